mod common;

use chrono::{Duration, TimeZone, Utc};
use chrono_tz::Tz::UTC;

use common::{event, member, photo, todo};
use familyHub::models::app_data::AppData;
use familyHub::models::todo::{Priority, sort_for_display};
use familyHub::service::dashboard_service::{build_summary, render_summary};

#[test]
fn newer_todos_come_first_among_equal_priority_actives() {
    let mut older = todo("t1", "Water plants", Priority::Medium, false);
    let mut newer = todo("t2", "Buy milk", Priority::Medium, false);
    older.created_at = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
    newer.created_at = Utc.with_ymd_and_hms(2026, 1, 2, 8, 0, 0).unwrap();

    let mut todos = vec![older, newer];
    sort_for_display(&mut todos);

    assert_eq!(todos[0].id, "t2");
    assert_eq!(todos[1].id, "t1");
}

#[test]
fn high_priority_leads_and_completed_sink() {
    let mut done = todo("t1", "Done already", Priority::High, true);
    done.created_at = Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap();
    let low = todo("t2", "Sometime", Priority::Low, false);
    let high = todo("t3", "Now", Priority::High, false);

    let mut todos = vec![done, low, high];
    sort_for_display(&mut todos);

    let ids: Vec<&str> = todos.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["t3", "t2", "t1"]);
}

#[test]
fn medium_and_low_only_tie_break_on_age() {
    let mut low_newer = todo("t1", "Low but fresh", Priority::Low, false);
    let mut medium_older = todo("t2", "Medium but old", Priority::Medium, false);
    low_newer.created_at = Utc.with_ymd_and_hms(2026, 1, 3, 8, 0, 0).unwrap();
    medium_older.created_at = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();

    let mut todos = vec![medium_older, low_newer];
    sort_for_display(&mut todos);

    // Only High jumps the queue; medium vs low is purely age.
    assert_eq!(todos[0].id, "t1");
}

#[test]
fn summary_collects_today_sorted_and_counts_actives() {
    let now = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
    let mut data = AppData::new();

    let late = event("late", "Dinner", now + Duration::hours(7), now + Duration::hours(8));
    let early = event("early", "Breakfast", now - Duration::hours(4), now - Duration::hours(3));
    let tomorrow = event(
        "tomorrow",
        "Dentist",
        now + Duration::days(1),
        now + Duration::days(1),
    );
    for e in [late, early, tomorrow] {
        data.events.insert(e.id.clone(), e);
    }
    data.todos
        .insert("t1".to_string(), todo("t1", "Buy milk", Priority::Medium, false));
    data.todos
        .insert("t2".to_string(), todo("t2", "Old chore", Priority::Low, true));

    let summary = build_summary(&data, now, UTC);

    let ids: Vec<&str> = summary.today_events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["early", "late"]);
    assert_eq!(summary.active_todo_count, 1);
}

#[test]
fn spotlight_prefers_high_priority_todos() {
    let now = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
    let mut data = AppData::new();
    for (id, priority) in [
        ("t1", Priority::Medium),
        ("t2", Priority::High),
        ("t3", Priority::Low),
    ] {
        data.todos.insert(id.to_string(), todo(id, id, priority, false));
    }

    let summary = build_summary(&data, now, UTC);

    assert_eq!(summary.spotlight_todos.len(), 1);
    assert_eq!(summary.spotlight_todos[0].id, "t2");
}

#[test]
fn recent_photos_are_newest_first_and_capped() {
    let now = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
    let mut data = AppData::new();
    for i in 0..5 {
        let p = photo(&format!("p{}", i), "m1", now - Duration::hours(i));
        data.photos.insert(p.id.clone(), p);
    }

    let summary = build_summary(&data, now, UTC);

    let ids: Vec<&str> = summary.recent_photos.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["p0", "p1", "p2"]);
}

#[test]
fn rendered_summary_degrades_missing_assignees() {
    let now = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
    let mut data = AppData::new();
    data.members.insert("m1".to_string(), member("m1", "Dana"));

    let mut assigned = todo("t1", "Walk the dog", Priority::High, false);
    assigned.assigned_to = Some("ghost".to_string());
    data.todos.insert("t1".to_string(), assigned);

    let summary = build_summary(&data, now, UTC);
    let text = render_summary(&summary, &data.members, UTC);

    assert!(text.contains("Walk the dog"));
    assert!(text.contains("Unassigned"));
    assert!(text.contains("Open todos: 1"));
}
