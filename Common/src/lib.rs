#![allow(non_snake_case)]

pub mod portal;
pub mod utils;
