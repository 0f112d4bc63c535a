pub mod utils;
pub mod auth_orchestrator;
pub mod detection_client;
pub mod overlay_renderer;
pub mod portal;
pub mod preference_store;
pub mod session_manager;
