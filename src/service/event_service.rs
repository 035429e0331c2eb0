use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::app_data::AppData;
use crate::models::event::{CalendarEvent, EventCategory};
use crate::service::storage_service::FamilyStore;

/// What a create request carries before normalization. Everything except
/// the title may be absent.
#[derive(Debug, Default, Clone)]
pub struct EventDraft {
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub is_all_day: bool,
    pub category: Option<EventCategory>,
    pub assigned_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    EmptyTitle,
    EndBeforeStart,
    UnknownId(String),
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::EmptyTitle => write!(f, "An event needs a title."),
            EventError::EndBeforeStart => write!(f, "An event cannot end before it starts."),
            EventError::UnknownId(id) => write!(f, "No event with id {} exists.", id),
        }
    }
}

impl std::error::Error for EventError {}

pub struct EventService;

impl EventService {
    /// Validates and fills a draft, applies it locally, then pushes the
    /// document out. The local insert is optimistic: a failed remote write
    /// is reported and kept, and the next authoritative snapshot settles
    /// any difference.
    pub async fn create(
        data: &Arc<Mutex<AppData>>,
        remote: &dyn FamilyStore,
        draft: EventDraft,
    ) -> Result<CalendarEvent, EventError> {
        let event = normalize_draft(draft)?;
        {
            let mut data = data.lock().await;
            data.events.insert(event.id.clone(), event.clone());
        }
        if let Err(err) = remote.set_event(&event).await {
            eprintln!("Failed to push event {}: {}", event.id, err);
        }
        Ok(event)
    }

    /// Full replacement; the id must name an existing event.
    pub async fn update(
        data: &Arc<Mutex<AppData>>,
        remote: &dyn FamilyStore,
        event: CalendarEvent,
    ) -> Result<CalendarEvent, EventError> {
        if event.title.trim().is_empty() {
            return Err(EventError::EmptyTitle);
        }
        if !event.is_all_day && event.end_time < event.start_time {
            return Err(EventError::EndBeforeStart);
        }
        {
            let mut data = data.lock().await;
            if !data.events.contains_key(&event.id) {
                return Err(EventError::UnknownId(event.id.clone()));
            }
            data.events.insert(event.id.clone(), event.clone());
        }
        if let Err(err) = remote.update_event(&event).await {
            eprintln!("Failed to push event update {}: {}", event.id, err);
        }
        Ok(event)
    }

    /// Local removal races ahead of the remote delete. An id that is
    /// already gone is a no-op, not an error, and the remote delete is
    /// still propagated in case the document outlived our copy.
    pub async fn delete(data: &Arc<Mutex<AppData>>, remote: &dyn FamilyStore, id: &str) {
        {
            let mut data = data.lock().await;
            data.events.remove(id);
        }
        if let Err(err) = remote.delete_event(id).await {
            eprintln!("Failed to delete event {} remotely: {}", id, err);
        }
    }
}

fn normalize_draft(draft: EventDraft) -> Result<CalendarEvent, EventError> {
    if draft.title.trim().is_empty() {
        return Err(EventError::EmptyTitle);
    }
    let start_time = draft.start_time.unwrap_or_else(Utc::now);
    let end_time = draft.end_time.unwrap_or(start_time + Duration::hours(1));
    if !draft.is_all_day && end_time < start_time {
        return Err(EventError::EndBeforeStart);
    }
    Ok(CalendarEvent {
        id: draft.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        title: draft.title,
        description: draft.description,
        location: draft.location,
        start_time,
        end_time,
        is_all_day: draft.is_all_day,
        category: draft.category.unwrap_or(EventCategory::General),
        assigned_to: draft.assigned_to,
    })
}
