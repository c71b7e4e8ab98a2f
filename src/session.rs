//! Async session driver.
//!
//! Owns an [`InputState`] on a tokio task, stamps each incoming event with the
//! runtime clock and wakes up at the repeat task's deadlines. The state never
//! leaves the task while it runs, so no locking is involved.

use crate::input::{InputState, PointerEvent};
use log::debug;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

/// Runs the event loop until every sender is dropped, then returns the state.
pub async fn run(mut state: InputState, mut events: mpsc::UnboundedReceiver<PointerEvent>) -> InputState {
    loop {
        let deadline = state.next_deadline().map(Instant::from_std);

        tokio::select! {
            // A release arriving together with a tick must win, so no tick
            // fires after the release.
            biased;

            event = events.recv() => match event {
                Some(event) => state.handle_event(&event, Instant::now().into_std()),
                None => break,
            },
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                state.tick(Instant::now().into_std());
            }
        }
    }

    debug!("Session channel closed");
    state
}

/// Handle to a spawned session.
pub struct Session {
    events: mpsc::UnboundedSender<PointerEvent>,
    task: JoinHandle<InputState>,
}

impl Session {
    /// Spawns the event loop on the current runtime.
    pub fn spawn(state: InputState) -> Self {
        let (events, receiver) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(state, receiver));
        Self { events, task }
    }

    /// Queues an event. Returns `false` if the session already stopped.
    pub fn send(&self, event: PointerEvent) -> bool {
        self.events.send(event).is_ok()
    }

    /// Closes the channel and waits for the final state.
    pub async fn finish(self) -> Result<InputState, tokio::task::JoinError> {
        drop(self.events);
        self.task.await
    }
}
