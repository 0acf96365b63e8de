//! Document domain façade over the `<base>/documents` collection.

use async_trait::async_trait;
use serde_json::json;

use crate::config::{AppConfig, Feature, FeatureFlags, StorageConfig};
use crate::http::{
    ClientError, Paginated, QueryParams, RequestOptions, RequestPolicy, ResourceClient,
    UploadFile,
};
use crate::model::{
    Document, DocumentCreateRequest, DocumentSearchQuery, DocumentStats, DocumentStatus,
    DocumentUpdateRequest, Metadata, TagCount,
};

const COLLECTION: &str = "documents";
const DEFAULT_POPULAR_TAGS: u32 = 20;

/// Document operations the effect pipeline depends on.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    async fn list_documents(&self) -> Result<Vec<Document>, ClientError>;

    async fn get_document(&self, id: &str) -> Result<Document, ClientError>;

    async fn create_document(&self, request: &DocumentCreateRequest)
        -> Result<Document, ClientError>;

    async fn update_document(&self, request: &DocumentUpdateRequest)
        -> Result<Document, ClientError>;

    async fn delete_document(&self, id: &str) -> Result<(), ClientError>;
}

#[derive(Clone)]
pub struct DocumentService {
    resource: ResourceClient<Document>,
    storage: StorageConfig,
    features: FeatureFlags,
}

impl DocumentService {
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        let resource = ResourceClient::new(
            &config.api.collection_url(COLLECTION),
            RequestPolicy::from(&config.api),
        )?;
        Ok(Self::with_resource(resource, config))
    }

    pub fn with_resource(resource: ResourceClient<Document>, config: &AppConfig) -> Self {
        Self {
            resource,
            storage: config.storage.clone(),
            features: config.features.clone(),
        }
    }

    pub fn resource(&self) -> &ResourceClient<Document> {
        &self.resource
    }

    /// Paginated search; page and limit default to 1 and 10.
    pub async fn search_documents(
        &self,
        query: &DocumentSearchQuery,
    ) -> Result<Paginated<Document>, ClientError> {
        self.resource
            .paginated(query.page, query.limit, &query.to_params())
            .await
    }

    pub async fn documents_by_category(&self, category: &str) -> Result<Vec<Document>, ClientError> {
        self.resource
            .list(&QueryParams::new().with("category", category))
            .await
    }

    pub async fn documents_by_status(
        &self,
        status: DocumentStatus,
    ) -> Result<Vec<Document>, ClientError> {
        self.resource
            .list(&QueryParams::new().with("status", status.as_str()))
            .await
    }

    pub async fn documents_by_author(&self, author_id: &str) -> Result<Vec<Document>, ClientError> {
        self.resource
            .list(&QueryParams::new().with("authorId", author_id))
            .await
    }

    pub async fn count_documents(&self, params: &QueryParams) -> Result<u64, ClientError> {
        self.resource.count(params).await
    }

    pub async fn upload_document_file(
        &self,
        file: UploadFile,
        metadata: &Metadata,
    ) -> Result<Document, ClientError> {
        self.check_upload(&file)?;
        tracing::info!(file = %file.file_name, bytes = file.size(), "Uploading document");
        self.resource.upload(file, metadata).await
    }

    pub async fn upload_multiple_files(
        &self,
        files: Vec<UploadFile>,
        metadata: &Metadata,
    ) -> Result<Vec<Document>, ClientError> {
        if files.is_empty() {
            return Err(ClientError::Validation("no files to upload".to_string()));
        }
        for file in &files {
            self.check_upload(file)?;
        }
        tracing::info!(count = files.len(), "Uploading documents");
        self.resource.upload_multiple(files, metadata).await
    }

    pub async fn download_document(&self, id: &str) -> Result<Vec<u8>, ClientError> {
        self.resource
            .custom_bytes("GET", &format!("{}/download", id), &RequestOptions::default())
            .await
    }

    pub async fn document_stats(&self) -> Result<DocumentStats, ClientError> {
        self.resource
            .custom_request("GET", "stats", None, &RequestOptions::default())
            .await
    }

    pub async fn popular_tags(&self, limit: Option<u32>) -> Result<Vec<TagCount>, ClientError> {
        let options = RequestOptions {
            params: QueryParams::new().with("limit", limit.unwrap_or(DEFAULT_POPULAR_TAGS)),
            ..RequestOptions::default()
        };
        self.resource
            .custom_request("GET", "tags/popular", None, &options)
            .await
    }

    pub async fn categories(&self) -> Result<Vec<String>, ClientError> {
        self.resource
            .custom_request("GET", "categories", None, &RequestOptions::default())
            .await
    }

    pub async fn duplicate_document(
        &self,
        id: &str,
        new_title: Option<&str>,
    ) -> Result<Document, ClientError> {
        let body = json!({ "newTitle": new_title });
        self.resource
            .custom_request(
                "POST",
                &format!("{}/duplicate", id),
                Some(&body),
                &RequestOptions::default(),
            )
            .await
    }

    pub async fn toggle_archive_status(&self, id: &str) -> Result<Document, ClientError> {
        self.resource
            .custom_request(
                "PATCH",
                &format!("{}/archive", id),
                None,
                &RequestOptions::default(),
            )
            .await
    }

    pub async fn toggle_publish_status(&self, id: &str) -> Result<Document, ClientError> {
        self.resource
            .custom_request(
                "PATCH",
                &format!("{}/publish", id),
                None,
                &RequestOptions::default(),
            )
            .await
    }

    /// Form-level checks; nothing is sent when a file fails them.
    fn check_upload(&self, file: &UploadFile) -> Result<(), ClientError> {
        if !self.features.is_enabled(Feature::FileUpload) {
            return Err(ClientError::Validation("file upload is disabled".to_string()));
        }

        let extension = file.extension().ok_or_else(|| {
            ClientError::Validation(format!("'{}' has no file extension", file.file_name))
        })?;
        let file_type = if extension == "md" { "markdown" } else { extension.as_str() };
        if !self.storage.is_file_type_allowed(file_type) {
            return Err(ClientError::Validation(format!(
                "file type '{}' is not allowed",
                extension
            )));
        }

        if !self.storage.is_file_size_allowed(file.size()) {
            return Err(ClientError::Validation(format!(
                "'{}' exceeds the {} upload limit",
                file.file_name,
                self.storage.max_file_size_formatted()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl DocumentApi for DocumentService {
    async fn list_documents(&self) -> Result<Vec<Document>, ClientError> {
        self.resource.list(&QueryParams::new()).await
    }

    async fn get_document(&self, id: &str) -> Result<Document, ClientError> {
        self.resource.get_by_id(id).await
    }

    async fn create_document(
        &self,
        request: &DocumentCreateRequest,
    ) -> Result<Document, ClientError> {
        self.resource.create(request).await
    }

    async fn update_document(
        &self,
        request: &DocumentUpdateRequest,
    ) -> Result<Document, ClientError> {
        self.resource.update(&request.id, request).await
    }

    async fn delete_document(&self, id: &str) -> Result<(), ClientError> {
        self.resource.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(config: &AppConfig) -> DocumentService {
        DocumentService::new(config).unwrap()
    }

    #[test]
    fn base_path_is_the_documents_collection() {
        let svc = service(&AppConfig::default());
        assert_eq!(
            svc.resource().base_url().as_str(),
            "http://localhost:3000/api/documents"
        );
    }

    #[test]
    fn upload_rejects_disallowed_type() {
        let svc = service(&AppConfig::default());
        let err = svc
            .check_upload(&UploadFile::new("payroll.exe", vec![0; 4]))
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(m) if m.contains("exe")));
    }

    #[test]
    fn upload_accepts_md_as_markdown() {
        let svc = service(&AppConfig::default());
        assert!(svc.check_upload(&UploadFile::new("notes.md", b"# x".to_vec())).is_ok());
    }

    #[test]
    fn upload_rejects_oversize_file() {
        let mut config = AppConfig::default();
        config.storage.max_file_size = 8;
        let svc = service(&config);
        let err = svc
            .check_upload(&UploadFile::new("big.txt", vec![b'a'; 9]))
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(m) if m.contains("8 Bytes")));
    }

    #[test]
    fn upload_respects_feature_flag() {
        let mut config = AppConfig::default();
        config.features.file_upload = false;
        let svc = service(&config);
        assert!(svc.check_upload(&UploadFile::new("a.txt", vec![1])).is_err());
    }
}
