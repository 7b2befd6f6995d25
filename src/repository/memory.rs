//! In-memory document store used in demo mode and tests

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Local, NaiveTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Document, DocumentStore, Repository};
use crate::{
    error::{AppError, AppResult},
    models::{
        appointment::NewAppointment, gallery::NewGalleryItem, AppointmentStatus, Category,
        SiteContent, WorkingHours,
    },
};

#[derive(Default)]
struct State {
    collections: HashMap<String, Vec<Document>>,
    singletons: HashMap<String, Value>,
}

/// Process-local store; contents are lost on restart
#[derive(Default)]
pub struct MemoryDocumentStore {
    state: RwLock<State>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(&self, collection: &str) -> AppResult<Vec<Document>> {
        let state = self.state.read().await;
        Ok(state.collections.get(collection).cloned().unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
        let state = self.state.read().await;
        Ok(state
            .collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn create(&self, collection: &str, record: Value) -> AppResult<String> {
        let id = Uuid::new_v4().to_string();
        let mut state = self.state.write().await;
        state
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                data: record,
            });
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> AppResult<()> {
        let mut state = self.state.write().await;
        let doc = state
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", collection, id)))?;

        match (doc.data.as_object_mut(), patch) {
            (Some(target), Value::Object(fields)) => {
                target.extend(fields);
                Ok(())
            }
            _ => Err(AppError::Persistence(format!(
                "Cannot merge non-object patch into {} {}",
                collection, id
            ))),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
        let mut state = self.state.write().await;
        let docs = state.collections.entry(collection.to_string()).or_default();
        let before = docs.len();
        docs.retain(|d| d.id != id);
        if docs.len() == before {
            return Err(AppError::NotFound(format!("{} {} not found", collection, id)));
        }
        Ok(())
    }

    async fn get_singleton(&self, key: &str) -> AppResult<Option<Value>> {
        let state = self.state.read().await;
        Ok(state.singletons.get(key).cloned())
    }

    async fn set_singleton(&self, key: &str, record: Value) -> AppResult<()> {
        let mut state = self.state.write().await;
        state.singletons.insert(key.to_string(), record);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Fill a fresh store with the sample gallery, content and bookings shown in demo mode
pub async fn seed_demo_data(repository: &Repository) -> AppResult<()> {
    let now = Utc::now();

    let artworks = [
        ("Japanese dragon", "photo-1611501275019-9b5cda994e8d"),
        ("Geometric flowers", "photo-1590246814883-55516d8c2afd"),
        ("Realistic tiger", "photo-1568515045052-f9a854d70bfd"),
        ("Traditional mandala", "photo-1475180098004-ca77a66827be"),
        ("Black rose", "photo-1562962230-16e4623d36e6"),
        ("Japanese waves", "photo-1598371839696-5c5bb00bdc28"),
    ];
    for (title, photo) in artworks {
        repository
            .gallery_create(NewGalleryItem {
                title: title.to_string(),
                image_url: format!(
                    "https://images.unsplash.com/{}?w=400&h=500&fit=crop",
                    photo
                ),
                file_name: None,
                created_at: now,
            })
            .await?;
    }

    repository.content_set(&SiteContent::default()).await?;
    repository.schedules_set_working_hours(&WorkingHours::default()).await?;

    let today = Local::now().date_naive();
    let samples = [
        (
            "Israel Israeli",
            "054-1234567",
            "israel@example.com",
            Category::Tattoo,
            "Japanese dragon on the forearm",
            2,
            14,
            AppointmentStatus::Pending,
        ),
        (
            "Sara Cohen",
            "052-9876543",
            "sara@example.com",
            Category::Painting,
            "Commissioned oil painting - Mediterranean seascape",
            5,
            11,
            AppointmentStatus::Confirmed,
        ),
    ];
    for (name, phone, email, category, description, days_ahead, hour, status) in samples {
        repository
            .appointments_create(&NewAppointment {
                full_name: name.to_string(),
                phone: phone.to_string(),
                email: email.to_string(),
                category,
                description: Some(description.to_string()),
                date: today + Duration::days(days_ahead),
                time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN),
                status,
                created_at: now,
            })
            .await?;
    }

    tracing::info!("Demo data seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_list_get() {
        let store = MemoryDocumentStore::new();
        let a = store.create("things", json!({"n": 1})).await.unwrap();
        let b = store.create("things", json!({"n": 2})).await.unwrap();
        assert_ne!(a, b);

        let docs = store.list("things").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, a);
        assert_eq!(docs[1].data, json!({"n": 2}));

        assert!(store.get("things", &b).await.unwrap().is_some());
        assert!(store.get("things", "missing").await.unwrap().is_none());
        assert!(store.list("empty").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryDocumentStore::new();
        let id = store
            .create("things", json!({"title": "old", "keep": true}))
            .await
            .unwrap();

        store.update("things", &id, json!({"title": "new"})).await.unwrap();

        let doc = store.get("things", &id).await.unwrap().unwrap();
        assert_eq!(doc.data, json!({"title": "new", "keep": true}));

        let missing = store.update("things", "nope", json!({})).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let store = MemoryDocumentStore::new();
        let id = store.create("things", json!({})).await.unwrap();

        store.delete("things", &id).await.unwrap();
        assert!(matches!(
            store.delete("things", &id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_singletons() {
        let store = MemoryDocumentStore::new();
        assert!(store.get_singleton("k").await.unwrap().is_none());

        store.set_singleton("k", json!({"v": 1})).await.unwrap();
        store.set_singleton("k", json!({"v": 2})).await.unwrap();
        assert_eq!(store.get_singleton("k").await.unwrap(), Some(json!({"v": 2})));
    }

    #[tokio::test]
    async fn test_seed_demo_data() {
        let repository = Repository::new(std::sync::Arc::new(MemoryDocumentStore::new()));
        seed_demo_data(&repository).await.unwrap();

        assert_eq!(repository.gallery_list().await.unwrap().len(), 6);
        assert_eq!(repository.appointments_list().await.unwrap().len(), 2);
        assert_eq!(
            repository.schedules_working_hours().await.unwrap(),
            Some(WorkingHours::default())
        );
    }
}
