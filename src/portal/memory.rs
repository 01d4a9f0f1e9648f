//! In-process backend.
//!
//! Keeps rows in insertion order behind `tokio` locks. Used by tests and for
//! trying the workflows without a hosted project.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::backend::PortalBackend;
use super::{Course, CourseDraft, DocumentDraft, DocumentItem, Lesson, LessonDraft};
use crate::error::{PortalError, Result};

/// [`PortalBackend`] backed by in-memory vectors.
#[derive(Default)]
pub struct MemoryBackend {
    courses: RwLock<Vec<Course>>,
    lessons: RwLock<Vec<Lesson>>,
    documents: RwLock<Vec<DocumentItem>>,
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes stored at `bucket/path`, if any.
    pub async fn object(&self, bucket: &str, path: &str) -> Option<Vec<u8>> {
        self.objects
            .read()
            .await
            .get(&object_key(bucket, path))
            .cloned()
    }

    /// Number of stored objects across all buckets.
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}

fn object_key(bucket: &str, path: &str) -> String {
    format!("{bucket}/{}", path.trim_start_matches('/'))
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn remove_by_id<T>(
    rows: &mut Vec<T>,
    id: &str,
    id_of: impl Fn(&T) -> &str,
    what: &str,
) -> Result<()> {
    let before = rows.len();
    rows.retain(|row| id_of(row) != id);
    if rows.len() == before {
        return Err(PortalError::NotFound(format!("{what} {id}")));
    }
    Ok(())
}

#[async_trait]
impl PortalBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        let lessons = self.lessons.read().await;
        let courses = self.courses.read().await;
        Ok(courses
            .iter()
            .map(|course| {
                let count = lessons.iter().filter(|l| l.course_id == course.id).count();
                Course {
                    lessons_count: u32::try_from(count).unwrap_or(u32::MAX),
                    ..course.clone()
                }
            })
            .collect())
    }

    async fn insert_course(&self, draft: &CourseDraft) -> Result<()> {
        self.courses.write().await.push(Course {
            id: new_id(),
            title: draft.title.clone(),
            category: draft.category.clone(),
            thumbnail: draft.cover_image.clone(),
            lessons_count: 0,
            progress: 0,
        });
        Ok(())
    }

    async fn update_course(&self, id: &str, draft: &CourseDraft) -> Result<()> {
        let mut courses = self.courses.write().await;
        let course = courses
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| PortalError::NotFound(format!("course {id}")))?;
        course.title.clone_from(&draft.title);
        course.category.clone_from(&draft.category);
        course.thumbnail.clone_from(&draft.cover_image);
        Ok(())
    }

    async fn delete_course(&self, id: &str) -> Result<()> {
        remove_by_id(&mut *self.courses.write().await, id, |c| c.id.as_str(), "course")?;
        self.lessons.write().await.retain(|l| l.course_id != id);
        Ok(())
    }

    async fn list_lessons(&self, course_id: &str) -> Result<Vec<Lesson>> {
        Ok(self
            .lessons
            .read()
            .await
            .iter()
            .filter(|l| l.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn insert_lesson(&self, draft: &LessonDraft) -> Result<()> {
        if !self.courses.read().await.iter().any(|c| c.id == draft.course_id) {
            return Err(PortalError::NotFound(format!("course {}", draft.course_id)));
        }
        self.lessons.write().await.push(Lesson {
            id: new_id(),
            course_id: draft.course_id.clone(),
            title: draft.title.clone(),
            video_url: draft.video_url.clone(),
            duration: draft.duration.clone(),
            description: draft.description.clone(),
        });
        Ok(())
    }

    async fn delete_lesson(&self, id: &str) -> Result<()> {
        remove_by_id(&mut *self.lessons.write().await, id, |l| l.id.as_str(), "lesson")
    }

    async fn list_documents(&self) -> Result<Vec<DocumentItem>> {
        // Newest first, like the hosted listing.
        Ok(self.documents.read().await.iter().rev().cloned().collect())
    }

    async fn insert_document(&self, draft: &DocumentDraft) -> Result<()> {
        self.documents.write().await.push(DocumentItem {
            id: new_id(),
            title: draft.title.clone(),
            category: draft.category.clone(),
            url: draft.url.clone(),
            uploader_id: Some(draft.uploader_id.clone()),
            size: Some(draft.size.clone()),
            created_at: Some(Utc::now()),
        });
        Ok(())
    }

    async fn delete_document(&self, id: &str) -> Result<()> {
        remove_by_id(&mut *self.documents.write().await, id, |d| d.id.as_str(), "document")
    }

    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<()> {
        let mut objects = self.objects.write().await;
        let key = object_key(bucket, path);
        if objects.contains_key(&key) {
            return Err(PortalError::Backend {
                status: 409,
                message: format!("object {key} already exists"),
            });
        }
        objects.insert(key, bytes);
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("memory://{}", object_key(bucket, path))
    }
}
