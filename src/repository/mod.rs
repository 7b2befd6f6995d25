//! Repository layer over a pluggable document store
//!
//! Business code talks to [`Repository`], which maps typed records onto a
//! [`DocumentStore`]. Two stores exist: PostgreSQL (durable) and an
//! in-memory store used in demo mode. The choice is made once at startup.

pub mod appointments;
pub mod content;
pub mod gallery;
pub mod memory;
pub mod postgres;
pub mod schedules;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};

pub const APPOINTMENTS: &str = "appointments";
pub const GALLERY: &str = "gallery";

pub const WORKING_HOURS_KEY: &str = "working_hours";
pub const BLOCKED_DATES_KEY: &str = "blocked_dates";
pub const SITE_CONTENT_KEY: &str = "site_content";

/// A stored record and the id the store assigned to it
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    /// Deserialize the record with its id folded back in
    pub fn into_record<T: DeserializeOwned>(self) -> AppResult<T> {
        let mut data = self.data;
        match data.as_object_mut() {
            Some(object) => {
                object.insert("id".to_string(), Value::String(self.id));
            }
            None => {
                return Err(AppError::Persistence(format!(
                    "Document {} is not an object",
                    self.id
                )))
            }
        }
        Ok(serde_json::from_value(data)?)
    }
}

/// Persistence provider contract
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents of a collection, in insertion order
    async fn list(&self, collection: &str) -> AppResult<Vec<Document>>;

    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>>;

    /// Insert a record and return its new id
    async fn create(&self, collection: &str, record: Value) -> AppResult<String>;

    /// Shallow-merge `patch` into an existing record
    async fn update(&self, collection: &str, id: &str, patch: Value) -> AppResult<()>;

    async fn delete(&self, collection: &str, id: &str) -> AppResult<()>;

    async fn get_singleton(&self, key: &str) -> AppResult<Option<Value>>;

    async fn set_singleton(&self, key: &str, record: Value) -> AppResult<()>;

    /// Cheap connectivity check for readiness probes
    async fn ping(&self) -> AppResult<()>;
}

/// Typed access to the studio collections
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn DocumentStore>,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    async fn list_records<T: DeserializeOwned>(&self, collection: &str) -> AppResult<Vec<T>> {
        self.store
            .list(collection)
            .await?
            .into_iter()
            .map(Document::into_record)
            .collect()
    }

    async fn get_record<T: DeserializeOwned>(&self, collection: &str, id: &str) -> AppResult<Option<T>> {
        match self.store.get(collection, id).await? {
            Some(doc) => Ok(Some(doc.into_record()?)),
            None => Ok(None),
        }
    }

    async fn create_record<T: Serialize>(&self, collection: &str, record: &T) -> AppResult<String> {
        self.store.create(collection, serde_json::to_value(record)?).await
    }

    async fn get_singleton_as<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self.store.get_singleton(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn set_singleton_from<T: Serialize>(&self, key: &str, record: &T) -> AppResult<()> {
        self.store.set_singleton(key, serde_json::to_value(record)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        id: String,
        name: String,
    }

    #[test]
    fn test_into_record_injects_id() {
        let doc = Document {
            id: "42".to_string(),
            data: json!({ "name": "koi" }),
        };
        let named: Named = doc.into_record().unwrap();
        assert_eq!(
            named,
            Named {
                id: "42".to_string(),
                name: "koi".to_string()
            }
        );
    }

    #[test]
    fn test_into_record_rejects_scalars() {
        let doc = Document {
            id: "1".to_string(),
            data: json!("scalar"),
        };
        assert!(matches!(doc.into_record::<Named>(), Err(AppError::Persistence(_))));
    }
}
