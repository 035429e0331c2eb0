use async_trait::async_trait;

use crate::models::event::CalendarEvent;
use crate::models::member::FamilyMember;
use crate::models::photo::Photo;
use crate::models::todo::TodoItem;

pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// The remote family document store: four independently readable
/// collections under one family id, plus a binary upload that hands back a
/// retrievable URL. `list_*` reads are complete snapshots, `set_*` is
/// create-or-replace by id, `update_*` is a partial patch by id.
#[async_trait]
pub trait FamilyStore: Send + Sync {
    async fn list_members(&self) -> Result<Vec<FamilyMember>, StoreError>;
    async fn list_todos(&self) -> Result<Vec<TodoItem>, StoreError>;
    async fn list_events(&self) -> Result<Vec<CalendarEvent>, StoreError>;
    async fn list_photos(&self) -> Result<Vec<Photo>, StoreError>;

    async fn set_member(&self, member: &FamilyMember) -> Result<(), StoreError>;

    async fn set_todo(&self, todo: &TodoItem) -> Result<(), StoreError>;
    async fn update_todo(&self, todo: &TodoItem) -> Result<(), StoreError>;
    async fn delete_todo(&self, id: &str) -> Result<(), StoreError>;

    async fn set_event(&self, event: &CalendarEvent) -> Result<(), StoreError>;
    async fn update_event(&self, event: &CalendarEvent) -> Result<(), StoreError>;
    async fn delete_event(&self, id: &str) -> Result<(), StoreError>;

    async fn set_photo(&self, photo: &Photo) -> Result<(), StoreError>;
    async fn delete_photo(&self, id: &str) -> Result<(), StoreError>;

    async fn upload_photo(&self, filename: &str, bytes: Vec<u8>) -> Result<String, StoreError>;
    async fn delete_photo_binary(&self, url: &str) -> Result<(), StoreError>;
}
