pub mod database;
pub mod io;
pub mod misc;
pub mod network;
pub mod system;
