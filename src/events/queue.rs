use tokio::sync::mpsc;

use crate::models::event::CalendarEvent;
use crate::models::member::FamilyMember;
use crate::models::photo::Photo;
use crate::models::todo::TodoItem;

/// One wholesale collection snapshot per variant. Within a collection,
/// snapshots arrive in subscription order; across collections there is no
/// ordering guarantee at all.
#[derive(Debug)]
pub enum SyncEvent {
    Members(Vec<FamilyMember>),
    Todos(Vec<TodoItem>),
    Events(Vec<CalendarEvent>),
    Photos(Vec<Photo>),
}

#[derive(Clone)]
pub struct EventBus {
    tx: mpsc::Sender<SyncEvent>,
}

impl EventBus {
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<SyncEvent>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx }, rx)
    }

    pub async fn emit(&self, event: SyncEvent) {
        let _ = self.tx.send(event).await;
    }
}
