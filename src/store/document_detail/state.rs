use crate::model::Document;
use crate::store::mvi::SliceState;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentDetailState {
    pub current_document: Option<Document>,
    pub loading: bool,
    pub saving: bool,
    pub error: Option<String>,
    pub is_edit_mode: bool,
    pub autosave_enabled: bool,
}

impl SliceState for DocumentDetailState {}
