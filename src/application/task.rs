// Handle for the periodic background tasks
use tokio::task::JoinHandle;

/// Owns a spawned periodic task. The task stops on `cancel` or when the handle is dropped.
#[derive(Debug)]
pub struct TaskHandle {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl TaskHandle {
    pub fn new(name: &'static str, handle: JoinHandle<()>) -> Self {
        Self { name, handle }
    }

    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            tracing::info!("Stopping {} task", self.name);
            self.handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
