// Domain layer - Pure data model and plot geometry
pub mod arc_path;
pub mod canvas;
pub mod clock;
pub mod color;
pub mod normalizer;
pub mod polar;
pub mod sample;
pub mod settings;
