//! Reducer for the documents list.

use crate::store::mvi::Reducer;

use super::actions::DocumentsListAction;
use super::state::DocumentsListState;

pub struct DocumentsListReducer;

impl Reducer for DocumentsListReducer {
    type State = DocumentsListState;
    type Action = DocumentsListAction;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State {
        match action {
            DocumentsListAction::Load
            | DocumentsListAction::Create { .. }
            | DocumentsListAction::Delete { .. } => DocumentsListState {
                loading: true,
                error: None,
                ..state
            },

            DocumentsListAction::LoadSuccess { documents } => DocumentsListState {
                documents,
                loading: false,
                error: None,
                ..state
            },

            // Appends without an id check: the same document created twice
            // is listed twice.
            DocumentsListAction::CreateSuccess { document } => {
                let mut documents = state.documents;
                documents.push(document);
                DocumentsListState {
                    documents,
                    loading: false,
                    error: None,
                    ..state
                }
            }

            DocumentsListAction::DeleteSuccess { id } => {
                let mut documents = state.documents;
                documents.retain(|doc| doc.id != id);
                DocumentsListState {
                    documents,
                    loading: false,
                    error: None,
                    ..state
                }
            }

            DocumentsListAction::LoadFailure { error }
            | DocumentsListAction::CreateFailure { error }
            | DocumentsListAction::DeleteFailure { error } => DocumentsListState {
                loading: false,
                error: Some(error),
                ..state
            },

            DocumentsListAction::SetFilter { filter } => DocumentsListState { filter, ..state },

            DocumentsListAction::ClearFilter => DocumentsListState {
                filter: String::new(),
                ..state
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::document;

    fn reduce_all(actions: Vec<DocumentsListAction>) -> DocumentsListState {
        actions
            .into_iter()
            .fold(DocumentsListState::default(), DocumentsListReducer::reduce)
    }

    #[test]
    fn load_sets_loading_and_clears_error() {
        let state = DocumentsListState {
            error: Some("boom".to_string()),
            ..Default::default()
        };
        let new = DocumentsListReducer::reduce(state, DocumentsListAction::Load);
        assert!(new.loading);
        assert!(new.error.is_none());
    }

    #[test]
    fn load_success_replaces_collection() {
        let docs = vec![document("1", "A"), document("2", "B")];
        let new = reduce_all(vec![
            DocumentsListAction::Load,
            DocumentsListAction::LoadSuccess {
                documents: docs.clone(),
            },
        ]);
        assert_eq!(new.documents, docs);
        assert!(!new.loading);
        assert!(new.error.is_none());
    }

    #[test]
    fn load_failure_keeps_previous_collection() {
        let docs = vec![document("1", "A")];
        let before = reduce_all(vec![DocumentsListAction::LoadSuccess {
            documents: docs.clone(),
        }]);
        let pending = DocumentsListReducer::reduce(before, DocumentsListAction::Load);
        let new = DocumentsListReducer::reduce(
            pending,
            DocumentsListAction::LoadFailure {
                error: "offline".to_string(),
            },
        );
        assert_eq!(new.documents, docs);
        assert!(!new.loading);
        assert_eq!(new.error.as_deref(), Some("offline"));
    }

    #[test]
    fn create_success_appends_without_dedup() {
        let doc = document("7", "Handbook");
        let new = reduce_all(vec![
            DocumentsListAction::CreateSuccess {
                document: doc.clone(),
            },
            DocumentsListAction::CreateSuccess {
                document: doc.clone(),
            },
        ]);
        assert_eq!(new.documents, vec![doc.clone(), doc]);
    }

    #[test]
    fn delete_success_removes_every_match_and_keeps_order() {
        let state = DocumentsListState {
            documents: vec![
                document("1", "A"),
                document("2", "B"),
                document("1", "A again"),
                document("3", "C"),
            ],
            loading: true,
            ..Default::default()
        };
        let new = DocumentsListReducer::reduce(
            state,
            DocumentsListAction::DeleteSuccess {
                id: "1".to_string(),
            },
        );
        let ids: Vec<&str> = new.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
        assert!(!new.loading);
    }

    #[test]
    fn success_applied_twice_is_stable() {
        let docs = vec![document("1", "A")];
        let once = reduce_all(vec![DocumentsListAction::LoadSuccess {
            documents: docs.clone(),
        }]);
        let twice = DocumentsListReducer::reduce(
            once.clone(),
            DocumentsListAction::LoadSuccess { documents: docs },
        );
        assert_eq!(once, twice);
    }

    #[test]
    fn delete_success_applied_twice_is_stable() {
        let state = DocumentsListState {
            documents: vec![document("1", "A"), document("2", "B")],
            loading: true,
            ..Default::default()
        };
        let delete = || DocumentsListAction::DeleteSuccess {
            id: "1".to_string(),
        };
        let once = DocumentsListReducer::reduce(state, delete());
        let twice = DocumentsListReducer::reduce(once.clone(), delete());
        assert_eq!(once, twice);
        assert_eq!(twice.documents.len(), 1);
        assert!(!twice.loading);
    }

    #[test]
    fn filter_actions_do_not_touch_flags() {
        let pending = DocumentsListReducer::reduce(Default::default(), DocumentsListAction::Load);
        let filtered = DocumentsListReducer::reduce(
            pending,
            DocumentsListAction::SetFilter {
                filter: "draft".to_string(),
            },
        );
        assert_eq!(filtered.filter, "draft");
        assert!(filtered.loading);

        let cleared = DocumentsListReducer::reduce(filtered, DocumentsListAction::ClearFilter);
        assert!(cleared.filter.is_empty());
    }
}
