//! Lesson video playback support.
//!
//! Turns whatever URL an editor pasted into a lesson into something a page
//! can play:
//!
//! - [`VideoSourceResolver`]: classifies a URL into a [`PlaybackSource`]
//! - [`Affordance`]: the element to render for a source (frame, media element, link)

pub mod embed;
pub mod patterns;
pub mod resolver;
pub mod source;

pub use embed::Affordance;
pub use resolver::{resolve, VideoSourceResolver};
pub use source::PlaybackSource;
