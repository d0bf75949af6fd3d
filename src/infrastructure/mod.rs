// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod fixture_repository;
pub mod http_response;
pub mod pachube_repository;
pub mod svg_canvas;
