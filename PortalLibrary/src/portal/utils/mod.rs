pub mod annotation;
pub mod display_geometry;
pub mod sign_in;
pub mod submission;
pub mod user_profile;
