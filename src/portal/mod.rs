//! Course and document portal.
//!
//! All persistence lives in an external backend (tables plus object
//! storage). This module holds the row shapes, the [`PortalBackend`] seam and
//! the workflows layered on top of it.
//!
//! # Architecture
//!
//! - [`PortalBackend`]: async trait for the remote tables and storage
//! - [`RestBackend`]: HTTP implementation
//! - [`MemoryBackend`]: in-process implementation
//! - [`CourseCatalog`] / [`LessonPlayer`]: course and lesson workflows
//! - [`DocumentLibrary`]: document search, upload and delete

pub mod access;
pub mod backend;
pub mod courses;
pub mod library;
pub mod memory;
pub mod rest;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub use access::{can_delete_document, is_admin};
pub use backend::PortalBackend;
pub use courses::{CourseCatalog, CourseForm, LessonForm, LessonPlayer, NowPlaying};
pub use library::{DocumentLibrary, PreparedUpload};
pub use memory::MemoryBackend;
pub use rest::RestBackend;

/// Categories offered when creating a course. The first is the default.
pub const COURSE_CATEGORIES: &[&str] = &[
    "Liturgia",
    "Fotografia",
    "Identidade Visual",
    "Redes Sociais",
    "Espiritualidade",
    "Técnica",
    "Outros",
];

/// Categories offered when uploading a document. The first is the default.
pub const DOCUMENT_CATEGORIES: &[&str] = &[
    "Geral",
    "Liturgia",
    "Técnica",
    "Administrativo",
    "Espiritualidade",
    "Identidade Visual",
];

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    /// Cover image URL; empty when the course has none.
    #[serde(rename = "cover_image", default, deserialize_with = "null_as_empty")]
    pub thumbnail: String,
    #[serde(default)]
    pub lessons_count: u32,
    /// Completion percentage for the current user.
    #[serde(default)]
    pub progress: u8,
}

/// A lesson of a course. `video_url` is free text and may be empty or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "id_string")]
    pub course_id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub video_url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub duration: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

/// A file in the document library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentItem {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default)]
    pub uploader_id: Option<String>,
    /// Human-readable size label such as `"1.25 MB"`.
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert/update payload for the `courses` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseDraft {
    pub title: String,
    pub category: String,
    pub cover_image: String,
}

/// Insert payload for the `lessons` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonDraft {
    pub course_id: String,
    pub title: String,
    pub video_url: String,
    pub duration: String,
    pub description: String,
}

/// Insert payload for the `documents` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentDraft {
    pub title: String,
    pub category: String,
    pub url: String,
    pub uploader_id: String,
    pub size: String,
}

/// Role name as stored by the backend's user profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRole(pub String);

impl UserRole {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserRole {
    fn from(role: &str) -> Self {
        Self(role.to_string())
    }
}

/// The signed-in user acting on the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: UserRole,
}

impl User {
    pub fn new(id: impl Into<String>, role: impl Into<UserRole>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            role: role.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept both text (uuid) and integer primary keys.
fn id_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
