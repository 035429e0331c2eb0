use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Appointment,
    Activity,
    Celebration,
    General,
}

impl EventCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "appointment" => Some(EventCategory::Appointment),
            "activity" => Some(EventCategory::Activity),
            "celebration" => Some(EventCategory::Celebration),
            "general" => Some(EventCategory::General),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventCategory::Appointment => "appointment",
            EventCategory::Activity => "activity",
            EventCategory::Celebration => "celebration",
            EventCategory::General => "general",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    // Must not precede start_time; ignored for layout when is_all_day.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub end_time: DateTime<Utc>,
    pub is_all_day: bool,
    #[serde(rename = "type")]
    pub category: EventCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}
