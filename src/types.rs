use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One history entry. Extra fields the service sends (`sentAt`, `sources`,
/// ...) are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

/// A conversation thread inside the remote workspace. Only the slug is needed
/// to address it; the name is kept for progress output.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Thread {
    pub slug: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Thread {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.slug)
    }
}

/// Where a memory section landed and whether it extended an existing file.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryWrite {
    pub path: PathBuf,
    pub appended: bool,
}
