use std::thread;

use map_app_core::{
    event::{ScreenEvent, ScreenHandle},
    screen::MapScreen,
};
use tokio::sync::mpsc;

/// Runs a [`MapScreen`] on its own thread, so every screen decision happens
/// on one execution context no matter which thread a platform callback
/// arrives on.
pub struct ScreenRuntime {
    events: ScreenHandle,
    thread: Option<thread::JoinHandle<()>>,
}

impl ScreenRuntime {
    pub fn start(
        screen: MapScreen,
        events: ScreenHandle,
        receiver: mpsc::UnboundedReceiver<ScreenEvent>,
    ) -> Result<Self, std::io::Error> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .thread_name("map-screen")
            .build()?;

        let thread = thread::Builder::new()
            .name("map-screen".to_owned())
            .spawn(move || runtime.block_on(screen.run(receiver)))?;

        Ok(Self {
            events,
            thread: Some(thread),
        })
    }

    pub fn is_running(&self) -> bool {
        self.thread
            .as_ref()
            .is_some_and(|thread| !thread.is_finished())
    }
}

impl Drop for ScreenRuntime {
    fn drop(&mut self) {
        self.events.post(ScreenEvent::Shutdown);
        if let Some(thread) = self.thread.take() {
            // joining from the screen thread itself would deadlock
            if thread.thread().id() != thread::current().id() {
                let _ = thread.join();
            }
        }
    }
}
