use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::model::{Document, DocumentStatus, Metadata};

use super::documents_list::DocumentsListState;
use super::AppState;

pub(crate) fn document(id: &str, title: &str) -> Document {
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

pub(crate) fn state_with_documents(documents: Vec<Document>, filter: &str) -> AppState {
    AppState {
        documents_list: Arc::new(DocumentsListState {
            documents,
            filter: filter.to_string(),
            ..Default::default()
        }),
        ..Default::default()
    }
}
