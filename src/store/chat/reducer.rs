use crate::model::{ChatMessage, ChatSession};
use crate::store::mvi::Reducer;

use super::actions::ChatAction;
use super::state::ChatState;

pub struct ChatReducer;

impl Reducer for ChatReducer {
    type State = ChatState;
    type Action = ChatAction;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State {
        match action {
            ChatAction::CreateSession { session } => {
                let current_session_id = Some(session.id.clone());
                let mut sessions = state.sessions;
                sessions.push(session);
                ChatState {
                    sessions,
                    current_session_id,
                    error: None,
                    ..state
                }
            }

            // Unknown ids are ignored so the selection never dangles.
            ChatAction::SelectSession { id } => {
                if state.sessions.iter().any(|s| s.id == id) {
                    ChatState {
                        current_session_id: Some(id),
                        ..state
                    }
                } else {
                    state
                }
            }

            ChatAction::DeleteSession { id } => {
                let mut sessions = state.sessions;
                sessions.retain(|s| s.id != id);
                let current_session_id = if state.current_session_id.as_deref() == Some(id.as_str()) {
                    sessions.first().map(|s| s.id.clone())
                } else {
                    state.current_session_id
                };
                ChatState {
                    sessions,
                    current_session_id,
                    ..state
                }
            }

            ChatAction::ClearAllSessions => ChatState {
                sessions: Vec::new(),
                current_session_id: None,
                error: None,
                suggestions: Vec::new(),
                ..state
            },

            ChatAction::AddMessage { message } => match state.current_session_id.clone() {
                Some(id) => append_message(state, &id, message),
                None => state,
            },

            ChatAction::SendMessage { .. } => ChatState {
                pending_replies: state.pending_replies + 1,
                error: None,
                ..state
            },

            ChatAction::SendMessageSuccess {
                session_id,
                message,
                suggestions,
            } => {
                let state = append_message(state, &session_id, message);
                ChatState {
                    pending_replies: state.pending_replies.saturating_sub(1),
                    suggestions,
                    ..state
                }
            }

            ChatAction::SendMessageFailure { error } => ChatState {
                pending_replies: state.pending_replies.saturating_sub(1),
                error: Some(error),
                ..state
            },
        }
    }
}

fn append_message(mut state: ChatState, session_id: &str, message: ChatMessage) -> ChatState {
    if let Some(session) = state.sessions.iter_mut().find(|s| s.id == session_id) {
        push(session, message);
    }
    state
}

fn push(session: &mut ChatSession, message: ChatMessage) {
    session.updated_at = session.updated_at.max(message.timestamp);
    session.messages.push(message);
}
