// Application state for HTTP handlers
use crate::application::repaint_loop::FrameReceiver;

#[derive(Clone)]
pub struct AppState {
    pub frames: FrameReceiver,
    pub width: u32,
    pub height: u32,
}
