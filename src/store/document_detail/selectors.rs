use crate::model::{Document, DocumentStatus};
use crate::store::AppState;

use super::state::DocumentDetailState;

pub fn select_document_detail_state(state: &AppState) -> &DocumentDetailState {
    &state.document_detail
}

pub fn select_current_document(state: &AppState) -> Option<&Document> {
    select_document_detail_state(state).current_document.as_ref()
}

pub fn select_document_loading(state: &AppState) -> bool {
    select_document_detail_state(state).loading
}

pub fn select_document_saving(state: &AppState) -> bool {
    select_document_detail_state(state).saving
}

pub fn select_document_error(state: &AppState) -> Option<&str> {
    select_document_detail_state(state).error.as_deref()
}

pub fn select_is_edit_mode(state: &AppState) -> bool {
    select_document_detail_state(state).is_edit_mode
}

pub fn select_autosave_enabled(state: &AppState) -> bool {
    select_document_detail_state(state).autosave_enabled
}

// Projections below fall back to empty values when nothing is loaded.

pub fn select_current_document_id(state: &AppState) -> Option<&str> {
    select_current_document(state).map(|doc| doc.id.as_str())
}

pub fn select_current_document_title(state: &AppState) -> &str {
    select_current_document(state).map_or("", |doc| doc.title.as_str())
}

pub fn select_current_document_content(state: &AppState) -> &str {
    select_current_document(state).map_or("", |doc| doc.content.as_str())
}

pub fn select_current_document_status(state: &AppState) -> DocumentStatus {
    select_current_document(state).map_or(DocumentStatus::Draft, |doc| doc.status)
}

pub fn select_current_document_tags(state: &AppState) -> &[String] {
    select_current_document(state)
        .map(|doc| doc.tags.as_slice())
        .unwrap_or_default()
}
