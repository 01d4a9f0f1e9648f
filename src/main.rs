//! `ava` CLI - resolve lesson videos and manage the course/document portal

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ava::AvaConfig;

#[derive(Parser)]
#[command(name = "ava")]
#[command(about = "Lesson video resolver and course/document portal client")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/ava/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON on stdout
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a video URL into a playback source
    Resolve {
        /// Video URL as entered on the lesson
        url: String,

        /// Origin of the embedding page (overrides config)
        #[arg(long)]
        origin: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the HTML player fragment for a video URL
    Embed {
        /// Video URL as entered on the lesson
        url: String,

        /// Frame title
        #[arg(short, long, default_value = "")]
        title: String,

        /// Origin of the embedding page (overrides config)
        #[arg(long)]
        origin: Option<String>,
    },

    /// List courses
    Courses {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the lessons of a course
    Lessons {
        /// Course ID
        course_id: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Play a lesson (the first one when no lesson is given)
    Play {
        /// Course ID
        course_id: String,

        /// Lesson ID
        lesson_id: Option<String>,

        /// Print the HTML player fragment instead of a summary
        #[arg(long)]
        html: bool,
    },

    /// Create or edit a course (admin)
    AddCourse {
        /// Course title
        #[arg(short, long)]
        title: String,

        /// Course category
        #[arg(short, long, default_value = "Liturgia")]
        category: String,

        /// Cover image to upload
        #[arg(long)]
        thumbnail: Option<PathBuf>,

        /// Existing course ID to update instead of creating
        #[arg(long)]
        id: Option<String>,
    },

    /// Delete a course (admin)
    DeleteCourse {
        /// Course ID
        id: String,
    },

    /// Add a lesson to a course (admin)
    AddLesson {
        /// Course ID
        course_id: String,

        /// Lesson title
        #[arg(short, long)]
        title: String,

        /// Video URL (YouTube, Vimeo, direct file or any page)
        #[arg(long, default_value = "")]
        video_url: String,

        /// Duration label, e.g. "12 min"
        #[arg(short, long, default_value = "")]
        duration: String,

        /// Lesson description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete a lesson (admin)
    DeleteLesson {
        /// Course ID
        course_id: String,

        /// Lesson ID
        lesson_id: String,
    },

    /// List library documents
    Docs {
        /// Filter by title or category
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Upload a document to the library
    Upload {
        /// File to upload (10 MB max)
        file: PathBuf,

        /// Title (default: file name)
        #[arg(short, long)]
        title: Option<String>,

        /// Category (default: Geral)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete a library document (owner or admin)
    DeleteDoc {
        /// Document ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = AvaConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Resolve {
            url,
            origin,
            format,
        } => {
            cmd::resolve::cmd_resolve(&config, &url, origin.as_deref(), format)?;
        }
        Commands::Embed { url, title, origin } => {
            cmd::resolve::cmd_embed(&config, &url, &title, origin.as_deref())?;
        }
        Commands::Courses { format } => {
            cmd::courses::cmd_courses(&config, format).await?;
        }
        Commands::Lessons { course_id, format } => {
            cmd::courses::cmd_lessons(&config, &course_id, format).await?;
        }
        Commands::Play {
            course_id,
            lesson_id,
            html,
        } => {
            cmd::courses::cmd_play(&config, &course_id, lesson_id.as_deref(), html).await?;
        }
        Commands::AddCourse {
            title,
            category,
            thumbnail,
            id,
        } => {
            cmd::courses::cmd_add_course(&config, title, category, thumbnail, id).await?;
        }
        Commands::DeleteCourse { id } => {
            cmd::courses::cmd_delete_course(&config, &id).await?;
        }
        Commands::AddLesson {
            course_id,
            title,
            video_url,
            duration,
            description,
        } => {
            let form = ava::portal::LessonForm {
                title,
                video_url,
                duration,
                description,
            };
            cmd::courses::cmd_add_lesson(&config, &course_id, &form).await?;
        }
        Commands::DeleteLesson {
            course_id,
            lesson_id,
        } => {
            cmd::courses::cmd_delete_lesson(&config, &course_id, &lesson_id).await?;
        }
        Commands::Docs { search, format } => {
            cmd::library::cmd_docs(&config, &search, format).await?;
        }
        Commands::Upload {
            file,
            title,
            category,
        } => {
            cmd::library::cmd_upload(&config, &file, title.as_deref(), category.as_deref())
                .await?;
        }
        Commands::DeleteDoc { id } => {
            cmd::library::cmd_delete_doc(&config, &id).await?;
        }
    }

    Ok(())
}
