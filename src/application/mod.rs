// Application layer - Rendering instance and the schedules driving it
pub mod feed_poller;
pub mod feed_repository;
pub mod radial_graph;
pub mod repaint_loop;
pub mod task;
