//! Domain entities exchanged with the REST API and held in the store.

pub mod chat;
pub mod document;
pub mod metadata;

pub use chat::{
    AiCapabilities, ChatContext, ChatMessage, ChatRequest, ChatResponse, ChatSession,
    MessageType, RelatedDocument, Sender,
};
pub use document::{
    canonical_timestamp, Document, DocumentCreateRequest, DocumentSearchQuery, DocumentStats,
    DocumentStatus, DocumentUpdateRequest, FileType, SortBy, SortOrder, TagCount,
    MIN_CONTENT_CHARS, MIN_TITLE_CHARS,
};
pub use metadata::{Metadata, MetadataValue};
