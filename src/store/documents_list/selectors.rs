//! Derived views over the documents list slice.

use crate::model::{Document, DocumentStatus};
use crate::store::AppState;

use super::state::DocumentsListState;

pub fn select_documents_list_state(state: &AppState) -> &DocumentsListState {
    &state.documents_list
}

pub fn select_all_documents(state: &AppState) -> &[Document] {
    &select_documents_list_state(state).documents
}

pub fn select_documents_loading(state: &AppState) -> bool {
    select_documents_list_state(state).loading
}

pub fn select_documents_error(state: &AppState) -> Option<&str> {
    select_documents_list_state(state).error.as_deref()
}

pub fn select_documents_filter(state: &AppState) -> &str {
    &select_documents_list_state(state).filter
}

/// Documents whose title, content or any tag contains the filter,
/// case-insensitively. An empty filter selects everything.
pub fn select_filtered_documents(state: &AppState) -> Vec<&Document> {
    let filter = select_documents_filter(state);
    let documents = select_all_documents(state);
    if filter.is_empty() {
        return documents.iter().collect();
    }
    let needle = filter.to_lowercase();
    documents
        .iter()
        .filter(|doc| doc.matches_text(&needle))
        .collect()
}

pub fn select_documents_count(state: &AppState) -> usize {
    select_all_documents(state).len()
}

pub fn select_published_documents(state: &AppState) -> Vec<&Document> {
    with_status(state, DocumentStatus::Published)
}

pub fn select_draft_documents(state: &AppState) -> Vec<&Document> {
    with_status(state, DocumentStatus::Draft)
}

fn with_status(state: &AppState, status: DocumentStatus) -> Vec<&Document> {
    select_all_documents(state)
        .iter()
        .filter(|doc| doc.status == status)
        .collect()
}
