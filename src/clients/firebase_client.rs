use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::models::event::CalendarEvent;
use crate::models::member::FamilyMember;
use crate::models::photo::Photo;
use crate::models::todo::TodoItem;
use crate::service::storage_service::{FamilyStore, StoreError};

#[derive(Debug, serde::Deserialize)]
struct UploadResponse {
    name: String,
    #[serde(rename = "downloadTokens")]
    download_tokens: Option<String>,
}

/// REST client for the hosted family database. Documents live under
/// `families/{family}/{collection}/{id}.json`; a whole collection reads as
/// one id-keyed JSON object (or `null` while empty). Binaries go through
/// the storage endpoint, which answers with a tokened download name.
pub struct FirebaseFamilyStore {
    client: reqwest::Client,
    db_url: String,
    storage_url: String,
    family_id: String,
}

impl FirebaseFamilyStore {
    pub fn new(db_url: String, storage_url: String, family_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            db_url: db_url.trim_end_matches('/').to_string(),
            storage_url: storage_url.trim_end_matches('/').to_string(),
            family_id,
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/families/{}/{}.json", self.db_url, self.family_id, collection)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/families/{}/{}/{}.json",
            self.db_url, self.family_id, collection, id
        )
    }

    async fn list<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, StoreError> {
        let response = self.client.get(self.collection_url(collection)).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(format!(
                "Listing {} failed with status {}: {}",
                collection, status, text
            )
            .into());
        }
        let documents: Option<HashMap<String, T>> = serde_json::from_str(&text)
            .map_err(|e| format!("Failed to parse {} listing: {}", collection, e))?;
        Ok(documents.unwrap_or_default().into_values().collect())
    }

    async fn put<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        document: &T,
    ) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.document_url(collection, id))
            .json(document)
            .send()
            .await?;
        self.check(response, collection, id, "write").await
    }

    async fn patch<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        document: &T,
    ) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(self.document_url(collection, id))
            .json(document)
            .send()
            .await?;
        self.check(response, collection, id, "update").await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.document_url(collection, id))
            .send()
            .await?;
        self.check(response, collection, id, "delete").await
    }

    async fn check(
        &self,
        response: reqwest::Response,
        collection: &str,
        id: &str,
        verb: &str,
    ) -> Result<(), StoreError> {
        if !response.status().is_success() {
            return Err(format!(
                "Failed to {} {}/{}: status {}",
                verb,
                collection,
                id,
                response.status()
            )
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl FamilyStore for FirebaseFamilyStore {
    async fn list_members(&self) -> Result<Vec<FamilyMember>, StoreError> {
        self.list("members").await
    }

    async fn list_todos(&self) -> Result<Vec<TodoItem>, StoreError> {
        self.list("todos").await
    }

    async fn list_events(&self) -> Result<Vec<CalendarEvent>, StoreError> {
        self.list("events").await
    }

    async fn list_photos(&self) -> Result<Vec<Photo>, StoreError> {
        self.list("photos").await
    }

    async fn set_member(&self, member: &FamilyMember) -> Result<(), StoreError> {
        self.put("members", &member.id, member).await
    }

    async fn set_todo(&self, todo: &TodoItem) -> Result<(), StoreError> {
        self.put("todos", &todo.id, todo).await
    }

    async fn update_todo(&self, todo: &TodoItem) -> Result<(), StoreError> {
        self.patch("todos", &todo.id, todo).await
    }

    async fn delete_todo(&self, id: &str) -> Result<(), StoreError> {
        self.delete("todos", id).await
    }

    async fn set_event(&self, event: &CalendarEvent) -> Result<(), StoreError> {
        self.put("events", &event.id, event).await
    }

    async fn update_event(&self, event: &CalendarEvent) -> Result<(), StoreError> {
        self.patch("events", &event.id, event).await
    }

    async fn delete_event(&self, id: &str) -> Result<(), StoreError> {
        self.delete("events", id).await
    }

    async fn set_photo(&self, photo: &Photo) -> Result<(), StoreError> {
        self.put("photos", &photo.id, photo).await
    }

    async fn delete_photo(&self, id: &str) -> Result<(), StoreError> {
        self.delete("photos", id).await
    }

    async fn upload_photo(&self, filename: &str, bytes: Vec<u8>) -> Result<String, StoreError> {
        let object = format!(
            "photos/{}/{}_{}",
            self.family_id,
            Utc::now().timestamp_millis(),
            filename
        );
        let response = self
            .client
            .post(format!("{}/o?name={}", self.storage_url, escape_object(&object)))
            .header("Content-Type", "application/octet-stream")
            .body(bytes)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(format!("Upload failed with status {}: {}", status, text).into());
        }
        let uploaded: UploadResponse = serde_json::from_str(&text)
            .map_err(|e| format!("Failed to parse upload response: {}", e))?;
        let mut url = format!(
            "{}/o/{}?alt=media",
            self.storage_url,
            escape_object(&uploaded.name)
        );
        if let Some(token) = uploaded.download_tokens {
            url.push_str(&format!("&token={}", token));
        }
        Ok(url)
    }

    async fn delete_photo_binary(&self, url: &str) -> Result<(), StoreError> {
        let response = self.client.delete(url).send().await?;
        if !response.status().is_success() {
            return Err(format!("Binary delete failed with status {}", response.status()).into());
        }
        Ok(())
    }
}

// Object names carry slashes that must survive as a single path segment.
fn escape_object(name: &str) -> String {
    name.replace('/', "%2F")
}
