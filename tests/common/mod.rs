#![allow(dead_code)]

use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use familyHub::models::event::{CalendarEvent, EventCategory};
use familyHub::models::member::FamilyMember;
use familyHub::models::photo::Photo;
use familyHub::models::todo::{Priority, TodoItem};
use familyHub::service::storage_service::{FamilyStore, StoreError};

/// Family store double: canned collection listings the test can swap out
/// mid-flight, plus a record of every write in call order. With
/// `fail_writes` set, writes are recorded and then refused.
pub struct RecordingStore {
    pub members: StdMutex<Vec<FamilyMember>>,
    pub todos: StdMutex<Vec<TodoItem>>,
    pub events: StdMutex<Vec<CalendarEvent>>,
    pub photos: StdMutex<Vec<Photo>>,
    pub writes: StdMutex<Vec<String>>,
    pub fail_writes: bool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            members: StdMutex::new(Vec::new()),
            todos: StdMutex::new(Vec::new()),
            events: StdMutex::new(Vec::new()),
            photos: StdMutex::new(Vec::new()),
            writes: StdMutex::new(Vec::new()),
            fail_writes: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    pub fn recorded(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    fn record(&self, op: String) -> Result<(), StoreError> {
        self.writes.lock().unwrap().push(op);
        if self.fail_writes {
            Err("write refused".to_string().into())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl FamilyStore for RecordingStore {
    async fn list_members(&self) -> Result<Vec<FamilyMember>, StoreError> {
        Ok(self.members.lock().unwrap().clone())
    }

    async fn list_todos(&self) -> Result<Vec<TodoItem>, StoreError> {
        Ok(self.todos.lock().unwrap().clone())
    }

    async fn list_events(&self) -> Result<Vec<CalendarEvent>, StoreError> {
        Ok(self.events.lock().unwrap().clone())
    }

    async fn list_photos(&self) -> Result<Vec<Photo>, StoreError> {
        Ok(self.photos.lock().unwrap().clone())
    }

    async fn set_member(&self, member: &FamilyMember) -> Result<(), StoreError> {
        self.record(format!("set_member:{}", member.id))
    }

    async fn set_todo(&self, todo: &TodoItem) -> Result<(), StoreError> {
        self.record(format!("set_todo:{}", todo.id))
    }

    async fn update_todo(&self, todo: &TodoItem) -> Result<(), StoreError> {
        self.record(format!("update_todo:{}", todo.id))
    }

    async fn delete_todo(&self, id: &str) -> Result<(), StoreError> {
        self.record(format!("delete_todo:{}", id))
    }

    async fn set_event(&self, event: &CalendarEvent) -> Result<(), StoreError> {
        self.record(format!("set_event:{}", event.id))
    }

    async fn update_event(&self, event: &CalendarEvent) -> Result<(), StoreError> {
        self.record(format!("update_event:{}", event.id))
    }

    async fn delete_event(&self, id: &str) -> Result<(), StoreError> {
        self.record(format!("delete_event:{}", id))
    }

    async fn set_photo(&self, photo: &Photo) -> Result<(), StoreError> {
        self.record(format!("set_photo:{}", photo.id))
    }

    async fn delete_photo(&self, id: &str) -> Result<(), StoreError> {
        self.record(format!("delete_photo:{}", id))
    }

    async fn upload_photo(&self, filename: &str, _bytes: Vec<u8>) -> Result<String, StoreError> {
        self.record(format!("upload:{}", filename))?;
        Ok(format!("https://files.test/{}", filename))
    }

    async fn delete_photo_binary(&self, url: &str) -> Result<(), StoreError> {
        self.record(format!("delete_binary:{}", url))
    }
}

pub fn member(id: &str, name: &str) -> FamilyMember {
    FamilyMember {
        id: id.to_string(),
        name: name.to_string(),
        avatar: "🐱".to_string(),
    }
}

pub fn todo(id: &str, title: &str, priority: Priority, completed: bool) -> TodoItem {
    TodoItem {
        id: id.to_string(),
        title: title.to_string(),
        completed,
        assigned_to: None,
        priority,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn event(id: &str, title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        location: None,
        start_time: start,
        end_time: end,
        is_all_day: false,
        category: EventCategory::General,
        assigned_to: None,
    }
}

pub fn photo(id: &str, uploaded_by: &str, timestamp: DateTime<Utc>) -> Photo {
    Photo {
        id: id.to_string(),
        url: format!("https://files.test/{}.jpg", id),
        caption: String::new(),
        uploaded_by: uploaded_by.to_string(),
        timestamp,
    }
}
