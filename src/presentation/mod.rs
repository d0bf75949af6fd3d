// Presentation layer - HTTP surface for the rendered frames
pub mod app_state;
pub mod handlers;
