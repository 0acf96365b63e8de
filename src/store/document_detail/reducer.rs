use crate::store::mvi::Reducer;

use super::actions::DocumentDetailAction;
use super::state::DocumentDetailState;

pub struct DocumentDetailReducer;

impl Reducer for DocumentDetailReducer {
    type State = DocumentDetailState;
    type Action = DocumentDetailAction;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State {
        match action {
            DocumentDetailAction::Load { .. } => DocumentDetailState {
                loading: true,
                error: None,
                ..state
            },
            DocumentDetailAction::LoadSuccess { document } => DocumentDetailState {
                current_document: Some(document),
                loading: false,
                error: None,
                ..state
            },
            DocumentDetailAction::LoadFailure { error } => DocumentDetailState {
                loading: false,
                error: Some(error),
                ..state
            },

            DocumentDetailAction::Update { .. } => DocumentDetailState {
                saving: true,
                error: None,
                ..state
            },
            DocumentDetailAction::UpdateSuccess { document } => DocumentDetailState {
                current_document: Some(document),
                saving: false,
                error: None,
                ..state
            },
            DocumentDetailAction::UpdateFailure { error } => DocumentDetailState {
                saving: false,
                error: Some(error),
                ..state
            },

            DocumentDetailAction::ClearCurrent => DocumentDetailState {
                current_document: None,
                error: None,
                is_edit_mode: false,
                ..state
            },
            DocumentDetailAction::EnterEditMode => DocumentDetailState {
                is_edit_mode: true,
                ..state
            },
            DocumentDetailAction::ExitEditMode => DocumentDetailState {
                is_edit_mode: false,
                ..state
            },
            DocumentDetailAction::EnableAutosave => DocumentDetailState {
                autosave_enabled: true,
                ..state
            },
            DocumentDetailAction::DisableAutosave => DocumentDetailState {
                autosave_enabled: false,
                ..state
            },
        }
    }
}
