//! Document entity and the request shapes sent to the documents endpoint.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::http::{ClientError, Entity, QueryParams};
use crate::model::metadata::Metadata;

/// Minimum title length accepted by the create and edit forms.
pub const MIN_TITLE_CHARS: usize = 3;
/// Minimum content length accepted by the create and edit forms.
pub const MIN_CONTENT_CHARS: usize = 10;

/// Publication status. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl DocumentStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Published => "published",
            DocumentStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(DocumentStatus::Draft),
            "published" => Ok(DocumentStatus::Published),
            "archived" => Ok(DocumentStatus::Archived),
            other => Err(format!("unknown document status '{}'", other)),
        }
    }
}

/// Source file format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Txt,
    Json,
    Markdown,
    Pdf,
}

impl FileType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FileType::Txt => "txt",
            FileType::Json => "json",
            FileType::Markdown => "markdown",
            FileType::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Server-assigned, never changes after creation.
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Document {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Document {
    /// Case-insensitive substring match against title, content and tags.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCreateRequest {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl DocumentCreateRequest {
    /// Form-level checks run before the create intent is dispatched.
    pub fn validate(&self) -> Result<(), ClientError> {
        check_title(&self.title)?;
        check_content(&self.content)
    }
}

/// Partial update. Fields left as `None` are not sent and stay unchanged
/// server-side.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpdateRequest {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DocumentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl DocumentUpdateRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Checks only the fields being changed.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.id.trim().is_empty() {
            return Err(ClientError::Validation("document id is required".to_string()));
        }
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        if let Some(content) = &self.content {
            check_content(content)?;
        }
        Ok(())
    }
}

fn check_title(title: &str) -> Result<(), ClientError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ClientError::Validation("title is required".to_string()));
    }
    if title.chars().count() < MIN_TITLE_CHARS {
        return Err(ClientError::Validation(format!(
            "title must be at least {} characters",
            MIN_TITLE_CHARS
        )));
    }
    Ok(())
}

fn check_content(content: &str) -> Result<(), ClientError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ClientError::Validation("content is required".to_string()));
    }
    if content.chars().count() < MIN_CONTENT_CHARS {
        return Err(ClientError::Validation(format!(
            "content must be at least {} characters",
            MIN_CONTENT_CHARS
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Title,
    CreatedAt,
    UpdatedAt,
}

impl SortBy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortBy::Title => "title",
            SortBy::CreatedAt => "createdAt",
            SortBy::UpdatedAt => "updatedAt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Typed search query, translated to string query parameters by
/// [`DocumentSearchQuery::to_params`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentSearchQuery {
    pub query: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub status: Option<DocumentStatus>,
    pub author_id: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

impl DocumentSearchQuery {
    /// Filter parameters, excluding paging.
    ///
    /// Empty strings and empty tag lists are omitted, dates use the
    /// canonical `YYYY-MM-DDTHH:MM:SS.sssZ` form.
    pub fn to_params(&self) -> QueryParams {
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
        let tags = (!self.tags.is_empty()).then(|| self.tags.join(","));

        QueryParams::new()
            .with_opt("q", non_empty(&self.query))
            .with_opt("category", non_empty(&self.category))
            .with_opt("status", self.status.map(|s| s.as_str()))
            .with_opt("authorId", non_empty(&self.author_id))
            .with_opt("tags", tags)
            .with_opt("dateFrom", self.date_from.map(canonical_timestamp))
            .with_opt("dateTo", self.date_to.map(canonical_timestamp))
            .with_opt("sortBy", self.sort_by.map(|s| s.as_str()))
            .with_opt("sortOrder", self.sort_order.map(|s| s.as_str()))
    }
}

/// Serializes a timestamp the way the documents API expects it.
pub fn canonical_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    pub total: u64,
    #[serde(default)]
    pub by_status: std::collections::BTreeMap<String, u64>,
    #[serde(default)]
    pub by_category: std::collections::BTreeMap<String, u64>,
    #[serde(default)]
    pub by_file_type: std::collections::BTreeMap<String, u64>,
    #[serde(default)]
    pub recently_created: u64,
    #[serde(default)]
    pub recently_updated: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: u64,
}
