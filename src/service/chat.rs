//! Chat façade.
//!
//! There is no chat backend yet, so [`MockChatService`] stands in for one:
//! it waits a fixed latency and answers with one of a fixed set of replies.
//! Anything implementing [`ChatApi`] can replace it.

use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::config::ChatConfig;
use crate::http::ClientError;
use crate::model::chat::generate_id;
use crate::model::{AiCapabilities, ChatRequest, ChatResponse, ChatSession};

pub const MOCK_REPLIES: [&str; 10] = [
    "I'm here to help! How can I assist you with your documents today?",
    "That's an interesting question. Let me think about that...",
    "Based on your documents, I can help you with analysis, summaries, or any other questions.",
    "I can help you create, edit, or analyze documents. What would you like to work on?",
    "Here's what I found in your document collection...",
    "Would you like me to help you organize your documents or create new content?",
    "I can assist with document creation, editing, summarization, and much more!",
    "Let me search through your documents to find relevant information...",
    "I'm powered by AI and can help with various document-related tasks. What do you need?",
    "That's a great question! Here's what I can help you with...",
];

pub const MOCK_SUGGESTIONS: [&str; 4] = [
    "Tell me about my documents",
    "Help me create a new document",
    "Summarize my recent files",
    "Search for specific content",
];

/// Given a request, eventually produces exactly one response or error.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError>;

    fn capabilities(&self) -> AiCapabilities;
}

#[derive(Debug, Clone)]
pub struct MockChatService {
    latency: Duration,
}

impl MockChatService {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(Duration::from_millis(config.mock_latency_ms))
    }

    pub fn create_session(&self, title: Option<String>) -> ChatSession {
        ChatSession::new(title)
    }
}

impl Default for MockChatService {
    fn default() -> Self {
        Self::from_config(&ChatConfig::default())
    }
}

#[async_trait]
impl ChatApi for MockChatService {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        tokio::time::sleep(self.latency).await;

        let message = MOCK_REPLIES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(MOCK_REPLIES[0]);
        let session_id = request.session_id.clone().unwrap_or_else(generate_id);
        tracing::debug!(session = %session_id, "Mock chat reply");

        Ok(ChatResponse {
            message: message.to_string(),
            session_id,
            suggestions: MOCK_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            related_documents: Vec::new(),
        })
    }

    fn capabilities(&self) -> AiCapabilities {
        AiCapabilities {
            text_generation: true,
            code_generation: true,
            document_analysis: true,
            summarization: true,
            translation: true,
            question_answering: true,
        }
    }
}
