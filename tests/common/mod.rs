//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use std::collections::HashMap;
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use tempfile::TempDir;

use docdesk::config::AppConfig;
use docdesk::http::{ClientError, RequestPolicy};
use docdesk::model::{
    Document, DocumentCreateRequest, DocumentStatus, DocumentUpdateRequest, Metadata,
};
use docdesk::service::DocumentApi;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Write `content` to a `config.toml` in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Config pointed at a mock backend with short timeouts.
pub fn config_for(api_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.api.base_url = api_url.to_string();
    config.api.timeout_ms = 2_000;
    config.api.retry_attempts = 2;
    config.api.retry_delay_ms = 10;
    config
}

pub fn fast_policy() -> RequestPolicy {
    RequestPolicy {
        timeout: Duration::from_secs(2),
        retry_attempts: 2,
        retry_delay: Duration::from_millis(10),
    }
}

pub fn document(id: &str, title: &str) -> Document {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    Document {
        id: id.to_string(),
        title: title.to_string(),
        content: String::new(),
        description: None,
        status: DocumentStatus::Draft,
        tags: Vec::new(),
        category: "general".to_string(),
        file_type: None,
        file_size: None,
        author: None,
        version: None,
        metadata: Metadata::new(),
        created_at: at,
        updated_at: at,
    }
}

pub fn document_json(id: &str, title: &str) -> String {
    serde_json::to_string(&document(id, title)).unwrap()
}

// -- Fake document API --------------------------------------------------------

/// In-memory [`DocumentApi`] with per-call latency.
///
/// Updates and deletes sleep for the latency registered under the document
/// id (default zero), so tests can make an earlier call outlast a later one.
#[derive(Default)]
pub struct FakeDocumentApi {
    pub documents: Mutex<Vec<Document>>,
    pub latency: Mutex<HashMap<String, Duration>>,
    pub completed: Mutex<Vec<String>>,
    pub fail_with: Mutex<Option<String>>,
}

impl FakeDocumentApi {
    pub fn with_documents(documents: Vec<Document>) -> Arc<Self> {
        Arc::new(Self {
            documents: Mutex::new(documents),
            ..Default::default()
        })
    }

    pub fn set_latency(&self, key: &str, latency: Duration) {
        self.latency.lock().insert(key.to_string(), latency);
    }

    pub fn fail(&self, message: &str) {
        *self.fail_with.lock() = Some(message.to_string());
    }

    async fn pause(&self, key: &str) {
        let latency = self.latency.lock().get(key).copied();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn check(&self) -> Result<(), ClientError> {
        match self.fail_with.lock().clone() {
            Some(message) => Err(ClientError::Validation(message)),
            None => Ok(()),
        }
    }

    fn record(&self, entry: String) {
        self.completed.lock().push(entry);
    }
}

#[async_trait]
impl DocumentApi for FakeDocumentApi {
    async fn list_documents(&self) -> Result<Vec<Document>, ClientError> {
        self.pause("list").await;
        self.check()?;
        Ok(self.documents.lock().clone())
    }

    async fn get_document(&self, id: &str) -> Result<Document, ClientError> {
        self.pause(id).await;
        self.check()?;
        self.documents
            .lock()
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound {
                url: format!("/documents/{id}"),
            })
    }

    async fn create_document(
        &self,
        request: &DocumentCreateRequest,
    ) -> Result<Document, ClientError> {
        self.pause(&request.title).await;
        self.check()?;
        let id = format!("doc-{}", self.documents.lock().len() + 1);
        let mut created = document(&id, &request.title);
        created.content = request.content.clone();
        created.tags = request.tags.clone();
        self.documents.lock().push(created.clone());
        self.record(format!("create:{}", request.title));
        Ok(created)
    }

    async fn update_document(
        &self,
        request: &DocumentUpdateRequest,
    ) -> Result<Document, ClientError> {
        let key = request.title.clone().unwrap_or_default();
        self.pause(&key).await;
        self.check()?;
        let mut documents = self.documents.lock();
        let doc = documents
            .iter_mut()
            .find(|d| d.id == request.id)
            .ok_or_else(|| ClientError::NotFound {
                url: format!("/documents/{}", request.id),
            })?;
        if let Some(title) = &request.title {
            doc.title = title.clone();
        }
        if let Some(content) = &request.content {
            doc.content = content.clone();
        }
        let updated = doc.clone();
        drop(documents);
        self.record(format!("update:{key}"));
        Ok(updated)
    }

    async fn delete_document(&self, id: &str) -> Result<(), ClientError> {
        self.pause(id).await;
        self.check()?;
        let mut documents = self.documents.lock();
        let before = documents.len();
        documents.retain(|d| d.id != id);
        if documents.len() == before {
            return Err(ClientError::NotFound {
                url: format!("/documents/{id}"),
            });
        }
        drop(documents);
        self.record(format!("delete:{id}"));
        Ok(())
    }
}
