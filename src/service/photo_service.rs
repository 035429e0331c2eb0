use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::app_data::AppData;
use crate::models::photo::Photo;
use crate::service::storage_service::{FamilyStore, StoreError};

pub struct PhotoService;

impl PhotoService {
    /// The binary upload must succeed before a document exists to point at
    /// it; after that the document write follows the usual optimistic path.
    pub async fn add(
        data: &Arc<Mutex<AppData>>,
        remote: &dyn FamilyStore,
        filename: &str,
        bytes: Vec<u8>,
        caption: String,
        uploaded_by: Option<String>,
    ) -> Result<Photo, StoreError> {
        let url = remote.upload_photo(filename, bytes).await?;
        let photo = Photo {
            id: Uuid::new_v4().to_string(),
            url,
            caption,
            uploaded_by: uploaded_by.unwrap_or_else(|| "unknown".to_string()),
            timestamp: Utc::now(),
        };
        {
            let mut data = data.lock().await;
            data.photos.insert(photo.id.clone(), photo.clone());
        }
        if let Err(err) = remote.set_photo(&photo).await {
            eprintln!("Failed to push photo {}: {}", photo.id, err);
        }
        Ok(photo)
    }

    /// Removes the document; the stored binary is best effort only, since
    /// the URL may be external or already gone.
    pub async fn delete(data: &Arc<Mutex<AppData>>, remote: &dyn FamilyStore, id: &str) {
        let removed = {
            let mut data = data.lock().await;
            data.photos.remove(id)
        };
        let Some(photo) = removed else {
            return;
        };
        if let Err(err) = remote.delete_photo(&photo.id).await {
            eprintln!("Failed to delete photo {} remotely: {}", photo.id, err);
        }
        if let Err(err) = remote.delete_photo_binary(&photo.url).await {
            eprintln!("Could not delete stored file ({}): {}", photo.url, err);
        }
    }
}
