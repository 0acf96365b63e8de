use crate::model::{ChatMessage, ChatSession};
use crate::store::AppState;

use super::state::ChatState;

pub fn select_chat_state(state: &AppState) -> &ChatState {
    &state.chat
}

pub fn select_chat_sessions(state: &AppState) -> &[ChatSession] {
    &select_chat_state(state).sessions
}

pub fn select_current_session_id(state: &AppState) -> Option<&str> {
    select_chat_state(state).current_session_id.as_deref()
}

pub fn select_current_session(state: &AppState) -> Option<&ChatSession> {
    select_chat_state(state).current_session()
}

/// Messages of the selected session; empty when none is selected.
pub fn select_current_messages(state: &AppState) -> &[ChatMessage] {
    select_current_session(state)
        .map(|s| s.messages.as_slice())
        .unwrap_or_default()
}

pub fn select_is_typing(state: &AppState) -> bool {
    select_chat_state(state).is_typing()
}

pub fn select_chat_error(state: &AppState) -> Option<&str> {
    select_chat_state(state).error.as_deref()
}

pub fn select_chat_suggestions(state: &AppState) -> &[String] {
    &select_chat_state(state).suggestions
}

pub fn select_active_sessions(state: &AppState) -> Vec<&ChatSession> {
    select_chat_sessions(state)
        .iter()
        .filter(|s| s.is_active)
        .collect()
}
