use std::path::PathBuf;

use anyhow::{Context, Result};

use ava::portal::library::FileUpload;
use ava::portal::{CourseCatalog, CourseForm, LessonForm};
use ava::AvaConfig;

use super::connect;
use super::output::{print_json, print_source, truncate_text};
use crate::OutputFormat;

fn catalog(config: &AvaConfig) -> Result<CourseCatalog<ava::RestBackend>> {
    let backend = connect(config)?;
    Ok(CourseCatalog::new(backend, config.resolver()?)
        .with_thumbnails_bucket(config.storage.thumbnails_bucket.clone()))
}

pub async fn cmd_courses(config: &AvaConfig, format: OutputFormat) -> Result<()> {
    let courses = catalog(config)?.courses().await?;
    if format == OutputFormat::Json {
        return print_json(&courses);
    }

    println!("📚 {} courses", courses.len());
    for course in &courses {
        println!(
            "  {}  {:<40} {:<18} {} lessons, {}%",
            course.id,
            truncate_text(&course.title, 40),
            course.category,
            course.lessons_count,
            course.progress
        );
    }
    Ok(())
}

pub async fn cmd_lessons(config: &AvaConfig, course_id: &str, format: OutputFormat) -> Result<()> {
    let catalog = catalog(config)?;
    let player = catalog.open(course_id).await?;
    if format == OutputFormat::Json {
        return print_json(player.lessons());
    }

    println!("🎓 {} lessons", player.lessons().len());
    for (i, lesson) in player.lessons().iter().enumerate() {
        let source = ava::resolve(&lesson.video_url);
        let duration = if lesson.duration.is_empty() {
            String::new()
        } else {
            format!(" ({})", lesson.duration)
        };
        println!(
            "  {:>2}. {} {}{} [{}]",
            i + 1,
            lesson.id,
            lesson.title,
            duration,
            source.kind()
        );
        if !lesson.description.is_empty() {
            println!("      {}", truncate_text(&lesson.description, 72));
        }
    }
    Ok(())
}

pub async fn cmd_play(
    config: &AvaConfig,
    course_id: &str,
    lesson_id: Option<&str>,
    html: bool,
) -> Result<()> {
    let catalog = catalog(config)?;
    let mut player = catalog.open(course_id).await?;

    let playing = match lesson_id {
        Some(id) => player.play(id)?,
        None => player
            .play_first()
            .with_context(|| format!("course {course_id} has no lessons"))?,
    };

    if html {
        println!("{}", playing.affordance().to_html(&playing.lesson.title));
        return Ok(());
    }

    println!("▶️  {}", playing.lesson.title);
    print_source(&playing.source);
    if let Some(link) = playing.fallback_link() {
        println!("   Trouble playing? {link}");
    }
    Ok(())
}

pub async fn cmd_add_course(
    config: &AvaConfig,
    title: String,
    category: String,
    thumbnail: Option<PathBuf>,
    id: Option<String>,
) -> Result<()> {
    let catalog = catalog(config)?;
    let user = config.user();

    let mut form = CourseForm {
        id,
        title,
        category,
        ..CourseForm::default()
    };
    if let Some(existing) = &form.id {
        // Keep the current cover when editing without a new image
        if let Some(course) = catalog.courses().await?.iter().find(|c| &c.id == existing) {
            form.thumbnail.clone_from(&course.thumbnail);
        }
    }

    let cover = match thumbnail {
        Some(path) => Some(
            FileUpload::from_path(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?,
        ),
        None => None,
    };

    catalog.save_course(&user, &form, cover).await?;
    println!("✅ Saved course: {}", form.title);
    Ok(())
}

pub async fn cmd_delete_course(config: &AvaConfig, id: &str) -> Result<()> {
    catalog(config)?.delete_course(&config.user(), id).await?;
    println!("🗑️  Deleted course {id}");
    Ok(())
}

pub async fn cmd_add_lesson(config: &AvaConfig, course_id: &str, form: &LessonForm) -> Result<()> {
    let catalog = catalog(config)?;
    let mut player = catalog.open(course_id).await?;
    catalog.add_lesson(&config.user(), &mut player, form).await?;

    let source = ava::resolve(&form.video_url);
    println!("✅ Added lesson: {} ({})", form.title.trim(), source.kind());
    println!("   Course now has {} lessons", player.lessons().len());
    Ok(())
}

pub async fn cmd_delete_lesson(config: &AvaConfig, course_id: &str, lesson_id: &str) -> Result<()> {
    let catalog = catalog(config)?;
    let mut player = catalog.open(course_id).await?;
    catalog
        .delete_lesson(&config.user(), &mut player, lesson_id)
        .await?;
    println!("🗑️  Deleted lesson {lesson_id}");
    Ok(())
}
