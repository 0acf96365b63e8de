//! Load and create run side by side; a newer delete supersedes an older one.

use crate::store::effect::{EffectContext, Strategy};
use crate::store::AppAction;

use super::actions::DocumentsListAction;

const LOAD: &str = "documents_list/load";
const CREATE: &str = "documents_list/create";
const DELETE: &str = "documents_list/delete";

pub(crate) fn run(action: &DocumentsListAction, ctx: &EffectContext) {
    match action {
        DocumentsListAction::Load => {
            let api = ctx.documents();
            ctx.runner().spawn(
                LOAD,
                Strategy::Merge,
                async move {
                    match api.list_documents().await {
                        Ok(documents) => DocumentsListAction::LoadSuccess { documents },
                        Err(err) => DocumentsListAction::LoadFailure {
                            error: err.to_string(),
                        },
                    }
                    .into()
                },
                load_failure,
            );
        }

        DocumentsListAction::Create { document } => {
            let api = ctx.documents();
            let request = document.clone();
            ctx.runner().spawn(
                CREATE,
                Strategy::Merge,
                async move {
                    match api.create_document(&request).await {
                        Ok(document) => DocumentsListAction::CreateSuccess { document },
                        Err(err) => DocumentsListAction::CreateFailure {
                            error: err.to_string(),
                        },
                    }
                    .into()
                },
                create_failure,
            );
        }

        DocumentsListAction::Delete { id } => {
            let api = ctx.documents();
            let id = id.clone();
            ctx.runner().spawn(
                DELETE,
                Strategy::Switch,
                async move {
                    match api.delete_document(&id).await {
                        Ok(()) => DocumentsListAction::DeleteSuccess { id },
                        Err(err) => DocumentsListAction::DeleteFailure {
                            error: err.to_string(),
                        },
                    }
                    .into()
                },
                delete_failure,
            );
        }

        _ => {}
    }
}

fn load_failure(error: String) -> AppAction {
    DocumentsListAction::LoadFailure { error }.into()
}

fn create_failure(error: String) -> AppAction {
    DocumentsListAction::CreateFailure { error }.into()
}

fn delete_failure(error: String) -> AppAction {
    DocumentsListAction::DeleteFailure { error }.into()
}
