//! Per-domain façades fixing the collection path and adding convenience
//! operations on top of the resource client.

pub mod chat;
pub mod document;

pub use chat::{ChatApi, MockChatService, MOCK_REPLIES, MOCK_SUGGESTIONS};
pub use document::{DocumentApi, DocumentService};
