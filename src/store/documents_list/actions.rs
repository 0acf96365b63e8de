use crate::model::{Document, DocumentCreateRequest};
use crate::store::mvi::Action;

/// Every async intent has exactly one `*Success` and one `*Failure`.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentsListAction {
    Load,
    LoadSuccess { documents: Vec<Document> },
    LoadFailure { error: String },

    Create { document: DocumentCreateRequest },
    CreateSuccess { document: Document },
    CreateFailure { error: String },

    Delete { id: String },
    DeleteSuccess { id: String },
    DeleteFailure { error: String },

    SetFilter { filter: String },
    ClearFilter,
}

impl Action for DocumentsListAction {
    fn name(&self) -> &'static str {
        match self {
            Self::Load => "[Documents List] Load Documents",
            Self::LoadSuccess { .. } => "[Documents List] Load Documents Success",
            Self::LoadFailure { .. } => "[Documents List] Load Documents Failure",
            Self::Create { .. } => "[Documents List] Create Document",
            Self::CreateSuccess { .. } => "[Documents List] Create Document Success",
            Self::CreateFailure { .. } => "[Documents List] Create Document Failure",
            Self::Delete { .. } => "[Documents List] Delete Document",
            Self::DeleteSuccess { .. } => "[Documents List] Delete Document Success",
            Self::DeleteFailure { .. } => "[Documents List] Delete Document Failure",
            Self::SetFilter { .. } => "[Documents List] Set Filter",
            Self::ClearFilter => "[Documents List] Clear Filter",
        }
    }
}
