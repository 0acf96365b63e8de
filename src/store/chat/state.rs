use crate::model::ChatSession;
use crate::store::mvi::SliceState;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatState {
    pub sessions: Vec<ChatSession>,
    pub current_session_id: Option<String>,
    /// Replies requested but not yet resolved. Concurrent sends each hold one.
    pub pending_replies: u32,
    pub error: Option<String>,
    /// Follow-up prompts offered with the last reply.
    pub suggestions: Vec<String>,
}

impl ChatState {
    pub fn is_typing(&self) -> bool {
        self.pending_replies > 0
    }

    pub fn current_session(&self) -> Option<&ChatSession> {
        let id = self.current_session_id.as_deref()?;
        self.sessions.iter().find(|s| s.id == id)
    }
}

impl SliceState for ChatState {}
