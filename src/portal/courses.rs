//! Course catalog and lesson playback workflows.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::access::require_admin;
use super::backend::{PortalBackend, THUMBNAILS_BUCKET};
use super::library::FileUpload;
use super::{Course, CourseDraft, Lesson, LessonDraft, User, COURSE_CATEGORIES};
use crate::error::{PortalError, Result};
use crate::video::{Affordance, PlaybackSource, VideoSourceResolver};

/// Create/edit form for a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseForm {
    /// Set when editing an existing course.
    pub id: Option<String>,
    pub title: String,
    pub category: String,
    /// Current cover image URL. Inline `data:` previews are never persisted.
    pub thumbnail: String,
}

impl Default for CourseForm {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            category: COURSE_CATEGORIES[0].to_string(),
            thumbnail: String::new(),
        }
    }
}

impl CourseForm {
    /// Form pre-filled from an existing course.
    pub fn edit(course: &Course) -> Self {
        Self {
            id: Some(course.id.clone()),
            title: course.title.clone(),
            category: course.category.clone(),
            thumbnail: course.thumbnail.clone(),
        }
    }
}

/// Form for adding a lesson to a course.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonForm {
    pub title: String,
    pub video_url: String,
    pub duration: String,
    pub description: String,
}

/// Object name for an uploaded course cover.
fn thumbnail_path(upload: &FileUpload) -> String {
    format!("course-{}.{}", Utc::now().timestamp_millis(), upload.extension())
}

/// A lesson selected for playback with its freshly resolved source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub lesson: Lesson,
    pub source: PlaybackSource,
}

impl NowPlaying {
    pub fn affordance(&self) -> Affordance {
        Affordance::from(&self.source)
    }

    /// The lesson's raw URL, offered as a "trouble playing?" escape hatch.
    pub fn fallback_link(&self) -> Option<&str> {
        let url = self.lesson.video_url.trim();
        (!url.is_empty()).then_some(url)
    }
}

/// Lesson list and current selection for one open course.
///
/// The playback source is resolved again on every selection, so editing a
/// lesson's URL takes effect the next time it is played.
#[derive(Debug, Clone)]
pub struct LessonPlayer {
    course_id: String,
    lessons: Vec<Lesson>,
    current: Option<String>,
    resolver: VideoSourceResolver,
}

impl LessonPlayer {
    pub fn new(course_id: impl Into<String>, resolver: VideoSourceResolver) -> Self {
        Self {
            course_id: course_id.into(),
            lessons: Vec::new(),
            current: None,
            resolver,
        }
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Replace the lesson list. Clears the selection.
    pub fn load(&mut self, lessons: Vec<Lesson>) {
        self.lessons = lessons;
        self.current = None;
    }

    /// Select a lesson by id.
    pub fn play(&mut self, lesson_id: &str) -> Result<NowPlaying> {
        let lesson = self
            .lessons
            .iter()
            .find(|l| l.id == lesson_id)
            .ok_or_else(|| PortalError::NotFound(format!("lesson {lesson_id}")))?;
        let playing = self.now_playing(lesson);
        debug!("Playing {} as {}", lesson.title, playing.source.kind());
        self.current = Some(lesson.id.clone());
        Ok(playing)
    }

    /// Select the first lesson, if the course has any.
    pub fn play_first(&mut self) -> Option<NowPlaying> {
        let id = self.lessons.first()?.id.clone();
        self.play(&id).ok()
    }

    /// Mark a lesson as selected without resolving it.
    ///
    /// Returns `false` and leaves the selection untouched when the lesson is
    /// not loaded.
    pub fn select(&mut self, lesson_id: &str) -> bool {
        if !self.lessons.iter().any(|l| l.id == lesson_id) {
            return false;
        }
        self.current = Some(lesson_id.to_string());
        true
    }

    /// The selected lesson, resolved again.
    pub fn current(&self) -> Option<NowPlaying> {
        let id = self.current.as_deref()?;
        self.lessons
            .iter()
            .find(|l| l.id == id)
            .map(|l| self.now_playing(l))
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_active(&self, lesson_id: &str) -> bool {
        self.current.as_deref() == Some(lesson_id)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    fn now_playing(&self, lesson: &Lesson) -> NowPlaying {
        NowPlaying {
            lesson: lesson.clone(),
            source: self.resolver.resolve(&lesson.video_url),
        }
    }
}

/// Course and lesson workflows over a [`PortalBackend`].
pub struct CourseCatalog<B: ?Sized> {
    backend: Arc<B>,
    resolver: VideoSourceResolver,
    thumbnails_bucket: String,
}

impl<B: PortalBackend + ?Sized> CourseCatalog<B> {
    pub fn new(backend: Arc<B>, resolver: VideoSourceResolver) -> Self {
        Self {
            backend,
            resolver,
            thumbnails_bucket: THUMBNAILS_BUCKET.to_string(),
        }
    }

    #[must_use]
    pub fn with_thumbnails_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.thumbnails_bucket = bucket.into();
        self
    }

    pub async fn courses(&self) -> Result<Vec<Course>> {
        self.backend.list_courses().await
    }

    pub async fn lessons(&self, course_id: &str) -> Result<Vec<Lesson>> {
        self.backend.list_lessons(course_id).await
    }

    /// Load a course's lessons into a fresh player with nothing selected.
    pub async fn open(&self, course_id: &str) -> Result<LessonPlayer> {
        let mut player = LessonPlayer::new(course_id, self.resolver.clone());
        player.load(self.lessons(course_id).await?);
        debug!(
            "Opened course {} with {} lessons",
            course_id,
            player.lessons().len()
        );
        Ok(player)
    }

    /// Create or update a course, uploading a new cover image when given.
    pub async fn save_course(
        &self,
        user: &User,
        form: &CourseForm,
        cover: Option<FileUpload>,
    ) -> Result<()> {
        require_admin(user, "Saving a course")?;
        let title = form.title.trim();
        if title.is_empty() {
            return Err(PortalError::Validation("course title is required".into()));
        }

        let mut cover_image = form.thumbnail.clone();
        if let Some(upload) = cover {
            let path = thumbnail_path(&upload);
            let content_type = upload.content_type();
            self.backend
                .upload_object(&self.thumbnails_bucket, &path, upload.bytes, &content_type)
                .await?;
            cover_image = self.backend.public_url(&self.thumbnails_bucket, &path);
        }
        if cover_image.starts_with("data:") {
            cover_image.clear();
        }

        let draft = CourseDraft {
            title: title.to_string(),
            category: form.category.clone(),
            cover_image,
        };
        match &form.id {
            Some(id) => {
                self.backend.update_course(id, &draft).await?;
                info!("Updated course {}", title);
            }
            None => {
                self.backend.insert_course(&draft).await?;
                info!("Created course {}", title);
            }
        }
        Ok(())
    }

    pub async fn delete_course(&self, user: &User, course_id: &str) -> Result<()> {
        require_admin(user, "Deleting a course")?;
        self.backend.delete_course(course_id).await?;
        info!("Deleted course {}", course_id);
        Ok(())
    }

    /// Add a lesson to the player's course and reload its lessons.
    pub async fn add_lesson(
        &self,
        user: &User,
        player: &mut LessonPlayer,
        form: &LessonForm,
    ) -> Result<()> {
        require_admin(user, "Adding a lesson")?;
        let title = form.title.trim();
        if title.is_empty() {
            return Err(PortalError::Validation("lesson title is required".into()));
        }

        self.backend
            .insert_lesson(&LessonDraft {
                course_id: player.course_id().to_string(),
                title: title.to_string(),
                video_url: form.video_url.trim().to_string(),
                duration: form.duration.trim().to_string(),
                description: form.description.trim().to_string(),
            })
            .await?;
        info!("Added lesson {} to course {}", title, player.course_id());

        let lessons = self.lessons(player.course_id()).await?;
        player.load(lessons);
        Ok(())
    }

    /// Delete a lesson. Clears the selection if it was the one playing.
    pub async fn delete_lesson(
        &self,
        user: &User,
        player: &mut LessonPlayer,
        lesson_id: &str,
    ) -> Result<()> {
        require_admin(user, "Deleting a lesson")?;
        self.backend.delete_lesson(lesson_id).await?;
        info!("Deleted lesson {}", lesson_id);

        let keep = player
            .current_id()
            .filter(|id| *id != lesson_id)
            .map(str::to_string);
        let lessons = self.lessons(player.course_id()).await?;
        player.load(lessons);
        if let Some(id) = keep {
            if !player.select(&id) {
                debug!("Selected lesson {} is gone after reload", id);
            }
        }
        Ok(())
    }
}
