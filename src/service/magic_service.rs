use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::models::app_data::AppData;
use crate::models::event::{CalendarEvent, EventCategory};
use crate::models::member::FamilyMember;
use crate::models::todo::{Priority, TodoItem};
use crate::service::assistant_service::AssistantParser;
use crate::service::event_service::{EventDraft, EventService};
use crate::service::storage_service::FamilyStore;
use crate::service::todo_service::{TodoDraft, TodoService};

#[derive(Debug, Clone)]
pub enum MagicOutcome {
    Todo(TodoItem),
    Event(CalendarEvent),
}

/// Every failure mode behind the magic input (transport, refusal, junk
/// payload, missing title) collapses into this one retryable answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicError;

impl fmt::Display for MagicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not understand that.")
    }
}

impl std::error::Error for MagicError {}

/// Turns a plain-language request into a stored todo or event. The parsed
/// payload goes through the same defaulting rules as a hand-filled form,
/// so the assistant can omit anything but the title.
pub async fn handle_magic_input(
    text: &str,
    parser: &dyn AssistantParser,
    data: &Arc<Mutex<AppData>>,
    remote: &dyn FamilyStore,
) -> Result<MagicOutcome, MagicError> {
    if text.trim().is_empty() {
        return Err(MagicError);
    }
    let roster: Vec<FamilyMember> = {
        let data = data.lock().await;
        data.members.values().cloned().collect()
    };
    let parsed = match parser.parse(text, &roster).await {
        Ok(Some(parsed)) => parsed,
        Ok(None) | Err(_) => return Err(MagicError),
    };
    match parsed.kind.as_str() {
        "todo" => {
            let draft = todo_draft_from(&parsed.data);
            let todo = TodoService::create(data, remote, draft)
                .await
                .map_err(|_| MagicError)?;
            Ok(MagicOutcome::Todo(todo))
        }
        "event" => {
            let draft = event_draft_from(&parsed.data);
            let event = EventService::create(data, remote, draft)
                .await
                .map_err(|_| MagicError)?;
            Ok(MagicOutcome::Event(event))
        }
        _ => Err(MagicError),
    }
}

fn todo_draft_from(data: &Value) -> TodoDraft {
    TodoDraft {
        id: None,
        title: string_field(data, "title").unwrap_or_default(),
        priority: string_field(data, "priority").and_then(|p| Priority::parse(&p)),
        assigned_to: string_field(data, "assignedTo"),
    }
}

fn event_draft_from(data: &Value) -> EventDraft {
    EventDraft {
        id: None,
        title: string_field(data, "title").unwrap_or_default(),
        description: string_field(data, "description"),
        location: string_field(data, "location"),
        start_time: string_field(data, "startTime").and_then(|s| parse_instant(&s)),
        end_time: string_field(data, "endTime").and_then(|s| parse_instant(&s)),
        is_all_day: data.get("isAllDay").and_then(Value::as_bool).unwrap_or(false),
        category: string_field(data, "eventType").and_then(|c| EventCategory::parse(&c)),
        assigned_to: string_field(data, "assignedTo"),
    }
}

fn string_field(data: &Value, key: &str) -> Option<String> {
    let value = data.get(key)?.as_str()?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
