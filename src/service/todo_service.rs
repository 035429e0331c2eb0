use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::app_data::AppData;
use crate::models::todo::{Priority, TodoItem};
use crate::service::storage_service::FamilyStore;

#[derive(Debug, Default, Clone)]
pub struct TodoDraft {
    pub id: Option<String>,
    pub title: String,
    pub priority: Option<Priority>,
    pub assigned_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    EmptyTitle,
    UnknownId(String),
}

impl fmt::Display for TodoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoError::EmptyTitle => write!(f, "A todo needs a title."),
            TodoError::UnknownId(id) => write!(f, "No todo with id {} exists.", id),
        }
    }
}

impl std::error::Error for TodoError {}

pub struct TodoService;

impl TodoService {
    pub async fn create(
        data: &Arc<Mutex<AppData>>,
        remote: &dyn FamilyStore,
        draft: TodoDraft,
    ) -> Result<TodoItem, TodoError> {
        if draft.title.trim().is_empty() {
            return Err(TodoError::EmptyTitle);
        }
        let todo = TodoItem {
            id: draft.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: draft.title,
            completed: false,
            assigned_to: draft.assigned_to,
            priority: draft.priority.unwrap_or(Priority::Medium),
            created_at: Utc::now(),
        };
        {
            let mut data = data.lock().await;
            data.todos.insert(todo.id.clone(), todo.clone());
        }
        if let Err(err) = remote.set_todo(&todo).await {
            eprintln!("Failed to push todo {}: {}", todo.id, err);
        }
        Ok(todo)
    }

    /// Flips `completed` and nothing else; every other field, `created_at`
    /// included, passes through untouched. An unknown id is a no-op.
    pub async fn toggle(
        data: &Arc<Mutex<AppData>>,
        remote: &dyn FamilyStore,
        id: &str,
    ) -> Option<TodoItem> {
        let toggled = {
            let mut data = data.lock().await;
            let todo = data.todos.get_mut(id)?;
            todo.completed = !todo.completed;
            todo.clone()
        };
        if let Err(err) = remote.update_todo(&toggled).await {
            eprintln!("Failed to push todo update {}: {}", toggled.id, err);
        }
        Some(toggled)
    }

    /// Full replacement; the id must name an existing todo.
    pub async fn update(
        data: &Arc<Mutex<AppData>>,
        remote: &dyn FamilyStore,
        todo: TodoItem,
    ) -> Result<TodoItem, TodoError> {
        if todo.title.trim().is_empty() {
            return Err(TodoError::EmptyTitle);
        }
        {
            let mut data = data.lock().await;
            if !data.todos.contains_key(&todo.id) {
                return Err(TodoError::UnknownId(todo.id.clone()));
            }
            data.todos.insert(todo.id.clone(), todo.clone());
        }
        if let Err(err) = remote.update_todo(&todo).await {
            eprintln!("Failed to push todo update {}: {}", todo.id, err);
        }
        Ok(todo)
    }

    pub async fn delete(data: &Arc<Mutex<AppData>>, remote: &dyn FamilyStore, id: &str) {
        {
            let mut data = data.lock().await;
            data.todos.remove(id);
        }
        if let Err(err) = remote.delete_todo(id).await {
            eprintln!("Failed to delete todo {} remotely: {}", id, err);
        }
    }
}
