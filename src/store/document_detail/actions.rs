use crate::model::{Document, DocumentUpdateRequest};
use crate::store::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentDetailAction {
    Load { id: String },
    LoadSuccess { document: Document },
    LoadFailure { error: String },

    Update { update: DocumentUpdateRequest },
    UpdateSuccess { document: Document },
    UpdateFailure { error: String },

    ClearCurrent,
    EnterEditMode,
    ExitEditMode,
    EnableAutosave,
    DisableAutosave,
}

impl Action for DocumentDetailAction {
    fn name(&self) -> &'static str {
        match self {
            Self::Load { .. } => "[Document Detail] Load Document",
            Self::LoadSuccess { .. } => "[Document Detail] Load Document Success",
            Self::LoadFailure { .. } => "[Document Detail] Load Document Failure",
            Self::Update { .. } => "[Document Detail] Update Document",
            Self::UpdateSuccess { .. } => "[Document Detail] Update Document Success",
            Self::UpdateFailure { .. } => "[Document Detail] Update Document Failure",
            Self::ClearCurrent => "[Document Detail] Clear Current Document",
            Self::EnterEditMode => "[Document Detail] Enter Edit Mode",
            Self::ExitEditMode => "[Document Detail] Exit Edit Mode",
            Self::EnableAutosave => "[Document Detail] Enable Autosave",
            Self::DisableAutosave => "[Document Detail] Disable Autosave",
        }
    }
}
