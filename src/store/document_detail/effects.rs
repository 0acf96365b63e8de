//! Loads run side by side. A newer save supersedes an in-flight one, so the
//! last edit wins.

use crate::store::effect::{EffectContext, Strategy};
use crate::store::AppAction;

use super::actions::DocumentDetailAction;

const LOAD: &str = "document_detail/load";
const UPDATE: &str = "document_detail/update";

pub(crate) fn run(action: &DocumentDetailAction, ctx: &EffectContext) {
    match action {
        DocumentDetailAction::Load { id } => {
            let api = ctx.documents();
            let id = id.clone();
            ctx.runner().spawn(
                LOAD,
                Strategy::Merge,
                async move {
                    match api.get_document(&id).await {
                        Ok(document) => DocumentDetailAction::LoadSuccess { document },
                        Err(err) => DocumentDetailAction::LoadFailure {
                            error: err.to_string(),
                        },
                    }
                    .into()
                },
                load_failure,
            );
        }

        DocumentDetailAction::Update { update } => {
            let api = ctx.documents();
            let update = update.clone();
            ctx.runner().spawn(
                UPDATE,
                Strategy::Switch,
                async move {
                    match api.update_document(&update).await {
                        Ok(document) => DocumentDetailAction::UpdateSuccess { document },
                        Err(err) => DocumentDetailAction::UpdateFailure {
                            error: err.to_string(),
                        },
                    }
                    .into()
                },
                update_failure,
            );
        }

        _ => {}
    }
}

fn load_failure(error: String) -> AppAction {
    DocumentDetailAction::LoadFailure { error }.into()
}

fn update_failure(error: String) -> AppAction {
    DocumentDetailAction::UpdateFailure { error }.into()
}
