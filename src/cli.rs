use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use uuid::Uuid;

use crate::calendar::{grid, layout};
use crate::config::READINESS_WAIT;
use crate::models::app_data::Collection;
use crate::models::event::{CalendarEvent, EventCategory};
use crate::models::member::{FamilyMember, assignee_label};
use crate::models::todo::sort_for_display;
use crate::runtime::FamilyRuntime;
use crate::service::assistant_service::AssistantParser;
use crate::service::dashboard_service;
use crate::service::event_service::{EventDraft, EventService};
use crate::service::identity;
use crate::service::magic_service::{self, MagicOutcome};
use crate::service::member_service::{MemberService, OnboardingStatus, onboarding_status};
use crate::service::photo_service::PhotoService;
use crate::service::storage_service::FamilyStore;
use crate::service::todo_service::TodoService;

// Same avatar set the web frontend offers.
const AVATAR_OPTIONS: [&str; 16] = [
    "🐱", "🐶", "🐼", "🐨", "🦊", "🐯", "🦁", "🐮", "🐷", "🐸", "🐙", "🦋", "🌸", "🌟", "🌈", "💫",
];

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick or create the profile this device acts as.
    Onboard,
    /// Today's events, open todos and newest photos.
    Dashboard,
    /// Timeline for one day (defaults to today).
    Agenda {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Month grid with per-day event markers.
    Month {
        #[arg(long)]
        year: Option<i32>,
        /// 1-based month.
        #[arg(long)]
        month: Option<u32>,
    },
    /// All todos in display order.
    Todos,
    /// Flip a todo's completed flag.
    ToggleTodo { id: String },
    /// Create a calendar event.
    AddEvent {
        title: String,
        #[arg(long)]
        start: Option<DateTime<Utc>>,
        #[arg(long)]
        end: Option<DateTime<Utc>>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        all_day: bool,
    },
    /// Upload a photo to the family gallery.
    AddPhoto {
        path: String,
        #[arg(long, default_value = "")]
        caption: String,
    },
    /// Describe a todo or event in plain language.
    Magic,
}

pub async fn cli(
    runtime: &mut FamilyRuntime,
    remote: Arc<dyn FamilyStore>,
    parser: Arc<dyn AssistantParser>,
    tz: Tz,
) {
    // Fine to panic here
    let cli = Cli::parse();
    runtime.readiness.wait(READINESS_WAIT).await;

    match cli.command {
        Commands::Onboard => onboard(runtime, remote.as_ref()).await,
        Commands::Dashboard => {
            let data = runtime.data.lock().await;
            let summary = dashboard_service::build_summary(&data, Utc::now(), tz);
            println!(
                "{}",
                dashboard_service::render_summary(&summary, &data.members, tz)
            );
        }
        Commands::Agenda { date } => {
            let day = date.unwrap_or_else(|| Utc::now().with_timezone(&tz).date_naive());
            let data = runtime.data.lock().await;
            print_agenda(&data.events_vec(), &data.members, day, tz);
        }
        Commands::Month { year, month } => {
            let today = Utc::now().with_timezone(&tz).date_naive();
            let year = year.unwrap_or_else(|| today.year());
            let month0 = month.map(|m| m.saturating_sub(1)).unwrap_or_else(|| today.month0());
            let data = runtime.data.lock().await;
            print_month(&data.events_vec(), year, month0, tz);
        }
        Commands::Todos => {
            let data = runtime.data.lock().await;
            let mut todos: Vec<_> = data.todos.values().cloned().collect();
            sort_for_display(&mut todos);
            if todos.is_empty() {
                println!("No todos yet.");
            }
            for todo in todos {
                let mark = if todo.completed { "x" } else { " " };
                println!(
                    "[{}] {} [{}] ({}) id={}",
                    mark,
                    todo.title,
                    todo.priority.label(),
                    assignee_label(&data.members, todo.assigned_to.as_deref()),
                    todo.id
                );
            }
        }
        Commands::ToggleTodo { id } => {
            match TodoService::toggle(&runtime.data, remote.as_ref(), &id).await {
                Some(todo) => {
                    let state = if todo.completed { "done" } else { "open" };
                    println!("{} is now {}.", todo.title, state);
                }
                None => println!("No todo with id {}.", id),
            }
        }
        Commands::AddEvent {
            title,
            start,
            end,
            location,
            category,
            all_day,
        } => {
            let draft = EventDraft {
                title,
                location,
                start_time: start,
                end_time: end,
                is_all_day: all_day,
                category: category.as_deref().and_then(EventCategory::parse),
                ..Default::default()
            };
            match EventService::create(&runtime.data, remote.as_ref(), draft).await {
                Ok(event) => println!("Added \"{}\" ({}).", event.title, event.id),
                Err(err) => println!("Failed to add event: {}", err),
            }
        }
        Commands::AddPhoto { path, caption } => {
            let bytes = match std::fs::read(&path) {
                Ok(bytes) => bytes,
                Err(err) => {
                    println!("Could not read {}: {}", path, err);
                    runtime.shutdown();
                    return;
                }
            };
            let filename = std::path::Path::new(&path)
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("photo.jpg")
                .to_string();
            let uploaded_by = identity::load_local_user_id(&identity::get_identity_location());
            match PhotoService::add(
                &runtime.data,
                remote.as_ref(),
                &filename,
                bytes,
                caption,
                uploaded_by,
            )
            .await
            {
                Ok(photo) => println!("Uploaded {} ({}).", filename, photo.url),
                Err(err) => println!("Failed to upload photo: {}", err),
            }
        }
        Commands::Magic => {
            let input = match Text::new("What should the family remember?").prompt() {
                Ok(input) => input,
                Err(_) => {
                    println!("No input supplied.");
                    return;
                }
            };
            match magic_service::handle_magic_input(
                &input,
                parser.as_ref(),
                &runtime.data,
                remote.as_ref(),
            )
            .await
            {
                Ok(MagicOutcome::Todo(todo)) => println!("Added todo \"{}\".", todo.title),
                Ok(MagicOutcome::Event(event)) => println!("Added event \"{}\".", event.title),
                Err(err) => println!("{}", err),
            }
        }
    }

    runtime.shutdown();
}

async fn onboard(runtime: &mut FamilyRuntime, remote: &dyn FamilyStore) {
    let identity_path = identity::get_identity_location();
    let local_id = identity::load_local_user_id(&identity_path);
    let members = {
        let data = runtime.data.lock().await;
        data.members.clone()
    };

    if let OnboardingStatus::Ready { member_id } =
        onboarding_status(local_id.as_deref(), &members)
    {
        println!("Already onboarded as {}.", assignee_label(&members, Some(&member_id)));
        return;
    }

    let member = if members.is_empty() {
        match new_profile() {
            Some(member) => member,
            None => return,
        }
    } else {
        let mut names: Vec<String> = members.values().map(|m| m.name.clone()).collect();
        names.sort();
        names.push("New profile".to_string());
        let Ok(choice) = Select::new("Who are you?", names).prompt() else {
            return;
        };
        match members.values().find(|m| m.name == choice) {
            Some(member) => member.clone(),
            None => match new_profile() {
                Some(member) => member,
                None => return,
            },
        }
    };

    match MemberService::complete_onboarding(&runtime.data, remote, &identity_path, member).await {
        Ok(member) => println!("Welcome, {}!", member.name),
        Err(err) => println!("{}", err),
    }
}

fn new_profile() -> Option<FamilyMember> {
    let name = Text::new("Your name?").prompt().ok()?;
    if name.trim().is_empty() {
        println!("A profile needs a name.");
        return None;
    }
    let avatar = Select::new("Pick an avatar", AVATAR_OPTIONS.to_vec())
        .prompt()
        .ok()?;
    Some(FamilyMember {
        id: Uuid::new_v4().to_string(),
        name: name.trim().to_string(),
        avatar: avatar.to_string(),
    })
}

fn print_agenda(
    events: &[CalendarEvent],
    members: &Collection<FamilyMember>,
    day: NaiveDate,
    tz: Tz,
) {
    let column = layout::layout_day(events, day, tz);
    println!("{}", day.format("%A, %B %e"));
    for event in &column.all_day {
        println!("  all day  {} [{}]", event.title, event.category.label());
    }
    let mut timed = column.timed;
    timed.sort_by_key(|p| p.start_offset_minutes);
    if column.all_day.is_empty() && timed.is_empty() {
        println!("  No events for this day.");
    }
    for placed in timed {
        let event = &placed.event;
        println!(
            "  {:>5}  {} [{}] ({}, {} min)",
            event.start_time.with_timezone(&tz).format("%H:%M"),
            event.title,
            event.category.label(),
            assignee_label(members, event.assigned_to.as_deref()),
            placed.duration_minutes
        );
    }
}

fn print_month(events: &[CalendarEvent], year: i32, month0: u32, tz: Tz) {
    println!("Su Mo Tu We Th Fr Sa");
    let mut line = String::new();
    for (idx, cell) in grid::month_grid(year, month0).iter().enumerate() {
        match cell {
            Some(date) => {
                let markers = layout::day_markers(events, *date, tz).len();
                let tag = if markers > 0 { "*" } else { " " };
                line.push_str(&format!("{:>2}{}", date.day(), tag));
            }
            None => line.push_str("   "),
        }
        if idx % 7 == 6 {
            println!("{}", line.trim_end());
            line.clear();
        }
    }
    if !line.trim().is_empty() {
        println!("{}", line.trim_end());
    }
}
