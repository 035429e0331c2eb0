use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc, watch};

use crate::events::queue::SyncEvent;
use crate::models::app_data::AppData;

pub fn readiness_channel() -> (ReadinessSignal, ReadinessGate) {
    let (tx, rx) = watch::channel(false);
    (ReadinessSignal { tx }, ReadinessGate { rx })
}

pub struct ReadinessSignal {
    tx: watch::Sender<bool>,
}

impl ReadinessSignal {
    pub fn mark_ready(&self) {
        let _ = self.tx.send(true);
    }
}

/// Gates dependent views on the first real member data. A fixed timeout
/// also releases the gate so a slow network shows a transient empty roster
/// instead of blocking indefinitely.
pub struct ReadinessGate {
    rx: watch::Receiver<bool>,
}

impl ReadinessGate {
    pub fn is_ready(&self) -> bool {
        *self.rx.borrow()
    }

    pub async fn wait(&mut self, max_wait: Duration) {
        let _ = tokio::time::timeout(max_wait, self.rx.wait_for(|ready| *ready)).await;
    }
}

/// The single merge point. Each snapshot replaces its own collection
/// wholesale and touches nothing else; applying the same snapshot twice is
/// indistinguishable from applying it once, and an id missing from a
/// snapshot is gone locally the moment that snapshot lands.
pub async fn run_sync_worker(
    mut rx: mpsc::Receiver<SyncEvent>,
    data: Arc<Mutex<AppData>>,
    readiness: ReadinessSignal,
) {
    while let Some(event) = rx.recv().await {
        let mut data = data.lock().await;
        match event {
            SyncEvent::Members(members) => {
                data.replace_members(members);
                if !data.members.is_empty() {
                    readiness.mark_ready();
                }
            }
            SyncEvent::Todos(todos) => data.replace_todos(todos),
            SyncEvent::Events(events) => data.replace_events(events),
            SyncEvent::Photos(photos) => data.replace_photos(photos),
        }
    }
}
