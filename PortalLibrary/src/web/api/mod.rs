pub mod config;
pub mod dashboard;
pub mod default;
pub mod detect;
pub mod javascript;
pub mod log;
pub mod misc;
pub mod onboarding;
pub mod preference;
pub mod signin;
