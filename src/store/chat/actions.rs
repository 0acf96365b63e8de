use crate::model::{ChatMessage, ChatRequest, ChatSession};
use crate::store::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum ChatAction {
    CreateSession { session: ChatSession },
    SelectSession { id: String },
    DeleteSession { id: String },
    ClearAllSessions,

    AddMessage { message: ChatMessage },

    SendMessage { request: ChatRequest },
    SendMessageSuccess {
        session_id: String,
        message: ChatMessage,
        suggestions: Vec<String>,
    },
    SendMessageFailure { error: String },
}

impl Action for ChatAction {
    fn name(&self) -> &'static str {
        match self {
            Self::CreateSession { .. } => "[Chat] Create Session",
            Self::SelectSession { .. } => "[Chat] Select Session",
            Self::DeleteSession { .. } => "[Chat] Delete Session",
            Self::ClearAllSessions => "[Chat] Clear All Sessions",
            Self::AddMessage { .. } => "[Chat] Add Message",
            Self::SendMessage { .. } => "[Chat] Send Message",
            Self::SendMessageSuccess { .. } => "[Chat] Send Message Success",
            Self::SendMessageFailure { .. } => "[Chat] Send Message Failure",
        }
    }
}
