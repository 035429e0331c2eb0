use std::collections::HashMap;

use crate::models::event::CalendarEvent;
use crate::models::member::FamilyMember;
use crate::models::photo::Photo;
use crate::models::todo::TodoItem;

/// A collection keyed by entity id. Insertion order carries no meaning;
/// display order is always computed.
pub type Collection<T> = HashMap<String, T>;

/// The in-memory aggregate behind every view. Each collection is replaced
/// wholesale by the matching remote snapshot and never patched field by
/// field, so a remote deletion can never leave a stale entry behind.
#[derive(Debug, Default, Clone)]
pub struct AppData {
    pub members: Collection<FamilyMember>,
    pub todos: Collection<TodoItem>,
    pub events: Collection<CalendarEvent>,
    pub photos: Collection<Photo>,
}

impl AppData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_members(&mut self, members: Vec<FamilyMember>) {
        self.members = members.into_iter().map(|m| (m.id.clone(), m)).collect();
    }

    pub fn replace_todos(&mut self, todos: Vec<TodoItem>) {
        self.todos = todos.into_iter().map(|t| (t.id.clone(), t)).collect();
    }

    pub fn replace_events(&mut self, events: Vec<CalendarEvent>) {
        self.events = events.into_iter().map(|e| (e.id.clone(), e)).collect();
    }

    pub fn replace_photos(&mut self, photos: Vec<Photo>) {
        self.photos = photos.into_iter().map(|p| (p.id.clone(), p)).collect();
    }

    pub fn events_vec(&self) -> Vec<CalendarEvent> {
        self.events.values().cloned().collect()
    }
}
