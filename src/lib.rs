//! `Ava` - lesson video resolver and course/document portal client
//!
//! # Features
//!
//! - **Video classification**: YouTube, Vimeo, direct files, generic frames,
//!   and malformed YouTube links that must open externally
//! - **Embed affordances**: frame, media element or external link per source
//! - **Portal workflows**: courses, lessons and documents on a hosted
//!   table + storage backend
//!
//! # Example
//!
//! ```rust
//! use ava::{resolve, Affordance, PlaybackSource};
//!
//! let source = resolve("https://vimeo.com/76979871");
//! assert_eq!(source.video_id(), Some("76979871"));
//! assert!(matches!(Affordance::from(&source), Affordance::Frame { .. }));
//! assert_eq!(resolve(""), PlaybackSource::Empty);
//! ```

pub mod config;
pub mod error;
pub mod portal;
pub mod video;

pub use config::AvaConfig;
pub use error::PortalError;
pub use portal::{
    CourseCatalog, DocumentLibrary, LessonPlayer, MemoryBackend, PortalBackend, RestBackend,
};
pub use video::{resolve, Affordance, PlaybackSource, VideoSourceResolver};

/// Version of ava
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
