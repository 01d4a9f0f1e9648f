//! Backend seam: the remote tables and object storage the portal relies on.

use async_trait::async_trait;

use super::{Course, CourseDraft, DocumentDraft, DocumentItem, Lesson, LessonDraft};
use crate::error::Result;

/// Storage bucket for uploaded library documents.
pub const DOCUMENTS_BUCKET: &str = "formation-documents";

/// Storage bucket for course cover images.
pub const THUMBNAILS_BUCKET: &str = "course-thumbnails";

/// Remote table + storage service.
///
/// Implementations own persistence, ordering and authorization; callers only
/// shape payloads.
#[async_trait]
pub trait PortalBackend: Send + Sync {
    /// Short lowercase backend name (e.g., `"rest"`, `"memory"`).
    fn name(&self) -> &'static str;

    async fn list_courses(&self) -> Result<Vec<Course>>;

    async fn insert_course(&self, draft: &CourseDraft) -> Result<()>;

    async fn update_course(&self, id: &str, draft: &CourseDraft) -> Result<()>;

    async fn delete_course(&self, id: &str) -> Result<()>;

    /// Lessons of a course, oldest first.
    async fn list_lessons(&self, course_id: &str) -> Result<Vec<Lesson>>;

    async fn insert_lesson(&self, draft: &LessonDraft) -> Result<()>;

    async fn delete_lesson(&self, id: &str) -> Result<()>;

    async fn list_documents(&self) -> Result<Vec<DocumentItem>>;

    async fn insert_document(&self, draft: &DocumentDraft) -> Result<()>;

    async fn delete_document(&self, id: &str) -> Result<()>;

    /// Store `bytes` at `path` inside `bucket`.
    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;

    /// Public download URL of a stored object.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}
