//! Synchronous event delivery.
//!
//! Listeners run inside `emit`, in registration order. Every event is also
//! buffered until the next snapshot drains it.

use runner_core::events::RunEvent;

pub type Listener = Box<dyn FnMut(&RunEvent) + Send>;

#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
    buffer: Vec<RunEvent>,
}

impl EventBus {
    pub fn subscribe(&mut self, listener: impl FnMut(&RunEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self, event: RunEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
        self.buffer.push(event);
    }

    /// Take everything emitted since the last drain.
    pub fn drain(&mut self) -> Vec<RunEvent> {
        std::mem::take(&mut self.buffer)
    }

    pub fn pending(&self) -> &[RunEvent] {
        &self.buffer
    }
}
