use chrono::{NaiveDate, Timelike};
use chrono_tz::Tz;

use crate::calendar::dates::falls_on;
use crate::models::event::{CalendarEvent, EventCategory};

pub const PIXELS_PER_HOUR: f64 = 60.0;
/// Floor on rendered duration so zero-length and very short events stay
/// visible and clickable.
pub const MIN_RENDER_MINUTES: i64 = 30;
/// Month cells show at most this many category markers.
pub const DAY_MARKER_LIMIT: usize = 4;

#[derive(Debug, Clone)]
pub struct PositionedEvent {
    pub event: CalendarEvent,
    pub start_offset_minutes: i64,
    pub duration_minutes: i64,
    pub top: f64,
    pub height: f64,
}

/// One day column of the week/day timeline: all-day events stack above the
/// 24-hour track, timed events map onto it linearly.
#[derive(Debug, Clone, Default)]
pub struct DayColumn {
    pub all_day: Vec<CalendarEvent>,
    pub timed: Vec<PositionedEvent>,
}

/// Linear time-to-pixel placement. Deliberately not a collision-packing
/// algorithm: overlapping events overlap on screen (hover z-order is the
/// only disambiguation), and an event running past midnight keeps its raw
/// duration and spills below the column.
pub fn layout_day(events: &[CalendarEvent], day: NaiveDate, tz: Tz) -> DayColumn {
    let mut column = DayColumn::default();
    for event in events {
        if !falls_on(event.start_time, day, tz) {
            continue;
        }
        if event.is_all_day {
            column.all_day.push(event.clone());
        } else {
            column.timed.push(position(event, tz));
        }
    }
    column
}

fn position(event: &CalendarEvent, tz: Tz) -> PositionedEvent {
    let start = event.start_time.with_timezone(&tz);
    let start_offset_minutes = (start.hour() * 60 + start.minute()) as i64;
    let mut duration_minutes = (event.end_time - event.start_time).num_minutes();
    if duration_minutes < MIN_RENDER_MINUTES {
        duration_minutes = MIN_RENDER_MINUTES;
    }
    PositionedEvent {
        event: event.clone(),
        start_offset_minutes,
        duration_minutes,
        top: start_offset_minutes as f64 / 60.0 * PIXELS_PER_HOUR,
        height: duration_minutes as f64 / 60.0 * PIXELS_PER_HOUR,
    }
}

/// Density markers for a month cell: the categories of the day's first few
/// events. Pure display truncation; the day's event list is untouched.
pub fn day_markers(events: &[CalendarEvent], day: NaiveDate, tz: Tz) -> Vec<EventCategory> {
    events
        .iter()
        .filter(|e| falls_on(e.start_time, day, tz))
        .take(DAY_MARKER_LIMIT)
        .map(|e| e.category)
        .collect()
}

/// The selected-day agenda: every event starting that day, earliest first.
pub fn agenda_for_day(events: &[CalendarEvent], day: NaiveDate, tz: Tz) -> Vec<CalendarEvent> {
    let mut agenda: Vec<CalendarEvent> = events
        .iter()
        .filter(|e| falls_on(e.start_time, day, tz))
        .cloned()
        .collect();
    agenda.sort_by_key(|e| e.start_time);
    agenda
}
