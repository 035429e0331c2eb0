use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::calendar::dates::is_same_day;
use crate::models::app_data::{AppData, Collection};
use crate::models::event::CalendarEvent;
use crate::models::member::{FamilyMember, assignee_label};
use crate::models::photo::Photo;
use crate::models::todo::{Priority, TodoItem, sort_for_display};

const SPOTLIGHT_LIMIT: usize = 3;
const RECENT_PHOTO_LIMIT: usize = 3;

#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub today_events: Vec<CalendarEvent>,
    pub active_todo_count: usize,
    /// High-priority open todos when there are any, otherwise the newest
    /// open todos.
    pub spotlight_todos: Vec<TodoItem>,
    pub recent_photos: Vec<Photo>,
}

pub fn build_summary(data: &AppData, now: DateTime<Utc>, tz: Tz) -> DashboardSummary {
    let mut today_events: Vec<CalendarEvent> = data
        .events
        .values()
        .filter(|e| is_same_day(e.start_time, now, tz))
        .cloned()
        .collect();
    today_events.sort_by_key(|e| e.start_time);

    let mut actives: Vec<TodoItem> = data.todos.values().filter(|t| !t.completed).cloned().collect();
    sort_for_display(&mut actives);
    let high: Vec<TodoItem> = actives
        .iter()
        .filter(|t| t.priority == Priority::High)
        .cloned()
        .collect();
    let spotlight_todos = if high.is_empty() { &actives } else { &high }
        .iter()
        .take(SPOTLIGHT_LIMIT)
        .cloned()
        .collect();

    let mut recent_photos: Vec<Photo> = data.photos.values().cloned().collect();
    recent_photos.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    recent_photos.truncate(RECENT_PHOTO_LIMIT);

    DashboardSummary {
        active_todo_count: actives.len(),
        today_events,
        spotlight_todos,
        recent_photos,
    }
}

pub fn render_summary(
    summary: &DashboardSummary,
    members: &Collection<FamilyMember>,
    tz: Tz,
) -> String {
    let mut body = String::from("Here is what the family has going on today:\n");
    if summary.today_events.is_empty() {
        body.push_str("No events today.\n");
    } else {
        for event in &summary.today_events {
            let when = if event.is_all_day {
                "all day".to_string()
            } else {
                event.start_time.with_timezone(&tz).format("%H:%M").to_string()
            };
            body.push_str(&format!("- {} ({})\n", event.title, when));
        }
    }
    body.push_str(&format!("Open todos: {}\n", summary.active_todo_count));
    for (idx, todo) in summary.spotlight_todos.iter().enumerate() {
        body.push_str(&format!(
            "{}) {} [{}] ({})\n",
            idx + 1,
            todo.title,
            todo.priority.label(),
            assignee_label(members, todo.assigned_to.as_deref())
        ));
    }
    body.trim_end().to_string()
}
