use crate::model::Document;
use crate::store::mvi::SliceState;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentsListState {
    pub documents: Vec<Document>,
    /// True from an intent until its follow-up is reduced.
    pub loading: bool,
    pub error: Option<String>,
    /// Free-text filter; empty means no filtering.
    pub filter: String,
}

impl SliceState for DocumentsListState {}
