//! Lesson video URL classification.
//!
//! Rules are evaluated in order and the first one that produces a source
//! wins. URLs no rule claims fall through to [`PlaybackSource::GenericEmbed`].
//!
//! # Example
//!
//! ```rust
//! use ava::{PlaybackSource, VideoSourceResolver};
//!
//! let resolver = VideoSourceResolver::with_origin("https://portal.example.org");
//! match resolver.resolve("https://youtu.be/dQw4w9WgXcQ") {
//!     PlaybackSource::YouTubeEmbed { video_id, .. } => assert_eq!(video_id, "dQw4w9WgXcQ"),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

use tracing::trace;

use super::patterns;
use super::source::PlaybackSource;

/// One classification step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    /// Clean 11-character YouTube id.
    YouTube,
    /// Mentions YouTube but did not parse. Keeps it away from the generic frame.
    YouTubeFallback,
    Vimeo,
    DirectFile,
}

/// Evaluation order. YouTube rules must precede everything else so malformed
/// YouTube links never reach the generic frame.
const RULES: &[Rule] = &[
    Rule::YouTube,
    Rule::YouTubeFallback,
    Rule::Vimeo,
    Rule::DirectFile,
];

impl Rule {
    fn name(self) -> &'static str {
        match self {
            Self::YouTube => "youtube",
            Self::YouTubeFallback => "youtube-fallback",
            Self::Vimeo => "vimeo",
            Self::DirectFile => "direct-file",
        }
    }

    fn apply(self, url: &str, origin: &str) -> Option<PlaybackSource> {
        match self {
            Self::YouTube => patterns::youtube_id(url).map(|id| PlaybackSource::YouTubeEmbed {
                video_id: id.to_string(),
                embed_url: format!("https://www.youtube.com/embed/{id}?autoplay=1&origin={origin}"),
            }),
            Self::YouTubeFallback => {
                patterns::mentions_youtube(url).then(|| PlaybackSource::YouTubeExternalOnly {
                    original_url: url.to_string(),
                })
            }
            Self::Vimeo => patterns::vimeo_id(url).map(|id| PlaybackSource::VimeoEmbed {
                video_id: id.to_string(),
                embed_url: format!("https://player.vimeo.com/video/{id}?autoplay=1"),
            }),
            Self::DirectFile => patterns::direct_file_extension(url).map(|_| {
                PlaybackSource::DirectFile {
                    url: url.to_string(),
                }
            }),
        }
    }
}

/// Classifies lesson video URLs into a [`PlaybackSource`].
///
/// Holds only the embedding page's origin, which is appended to YouTube
/// embed URLs. Stateless otherwise: no cache, safe to share across threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoSourceResolver {
    origin: String,
}

impl VideoSourceResolver {
    /// Resolver with no known origin (`origin=` is left empty).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver for pages served from `origin` (e.g. `https://portal.example.org`).
    #[must_use]
    pub fn with_origin(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    /// Origin appended to YouTube embed URLs.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Classify `url`. Never fails; blank input yields [`PlaybackSource::Empty`].
    pub fn resolve(&self, url: &str) -> PlaybackSource {
        if url.trim().is_empty() {
            return PlaybackSource::Empty;
        }

        for rule in RULES {
            if let Some(source) = rule.apply(url, &self.origin) {
                trace!("Matched video rule {} for {}", rule.name(), url);
                return source;
            }
        }

        trace!("No video rule matched {}, using generic embed", url);
        PlaybackSource::GenericEmbed {
            url: url.to_string(),
        }
    }

    /// Classify a possibly missing URL.
    pub fn resolve_optional(&self, url: Option<&str>) -> PlaybackSource {
        url.map_or(PlaybackSource::Empty, |u| self.resolve(u))
    }
}

/// Classify `url` with no origin configured.
pub fn resolve(url: &str) -> PlaybackSource {
    VideoSourceResolver::new().resolve(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    fn assert_youtube(url: &str) {
        match resolve(url) {
            PlaybackSource::YouTubeEmbed {
                video_id,
                embed_url,
            } => {
                assert_eq!(video_id, ID, "url: {url}");
                assert!(embed_url.contains(&format!("/embed/{ID}?autoplay=1")));
            }
            other => panic!("expected YouTube embed for {url}, got {other:?}"),
        }
    }

    #[test]
    fn rules_are_ordered_youtube_first() {
        assert_eq!(RULES[0], Rule::YouTube);
        assert_eq!(RULES[1], Rule::YouTubeFallback);
        let names: Vec<_> = RULES.iter().map(|r| r.name()).collect();
        assert_eq!(names, ["youtube", "youtube-fallback", "vimeo", "direct-file"]);
    }

    #[test]
    fn blank_and_missing_are_empty() {
        assert_eq!(resolve(""), PlaybackSource::Empty);
        assert_eq!(resolve("   \t"), PlaybackSource::Empty);
        assert_eq!(
            VideoSourceResolver::new().resolve_optional(None),
            PlaybackSource::Empty
        );
    }

    #[test]
    fn youtube_shapes() {
        assert_youtube("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_youtube("https://youtube.com/watch?v=dQw4w9WgXcQ&list=PL123");
        assert_youtube("https://m.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_youtube("https://www.youtube.com/embed/dQw4w9WgXcQ");
        assert_youtube("https://www.youtube.com/embed/dQw4w9WgXcQ?start=30");
        assert_youtube("https://www.youtube.com/v/dQw4w9WgXcQ");
        assert_youtube("https://www.youtube.com/shorts/dQw4w9WgXcQ");
        assert_youtube("https://www.youtube.com/live/dQw4w9WgXcQ?si=abc");
        assert_youtube("https://youtu.be/dQw4w9WgXcQ");
        assert_youtube("https://youtu.be/dQw4w9WgXcQ?t=42");
        assert_youtube("https://www.youtube.com/user/SomeChannel/dQw4w9WgXcQ");
    }

    #[test]
    fn youtube_embed_url_carries_origin() {
        let resolver = VideoSourceResolver::with_origin("https://portal.example.org");
        let source = resolver.resolve("https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(
            source.inline_url(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&origin=https://portal.example.org")
        );
    }

    #[test]
    fn youtube_embed_url_without_origin() {
        assert_eq!(
            resolve("https://youtu.be/dQw4w9WgXcQ").inline_url(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&origin=")
        );
    }

    #[test]
    fn unparsed_youtube_goes_external() {
        let url = "https://youtube.com/thisisnotavalidpath";
        assert_eq!(
            resolve(url),
            PlaybackSource::YouTubeExternalOnly {
                original_url: url.to_string()
            }
        );
    }

    #[test]
    fn youtube_with_overlong_id_goes_external() {
        let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQXYZ";
        assert_eq!(resolve(url).kind(), "youtube_external_only");
        assert_eq!(resolve(url).external_url(), Some(url));
    }

    #[test]
    fn youtube_channel_page_goes_external() {
        let url = "https://www.youtube.com/@somechannel";
        assert_eq!(resolve(url).external_url(), Some(url));
    }

    #[test]
    fn vimeo_numeric_id() {
        assert_eq!(
            resolve("https://vimeo.com/123456789"),
            PlaybackSource::VimeoEmbed {
                video_id: "123456789".into(),
                embed_url: "https://player.vimeo.com/video/123456789?autoplay=1".into(),
            }
        );
        assert_eq!(
            resolve("https://vimeo.com/channels/staffpicks/42").video_id(),
            Some("42")
        );
    }

    #[test]
    fn vimeo_without_id_falls_back_to_generic() {
        let url = "https://vimeo.com/about";
        assert_eq!(
            resolve(url),
            PlaybackSource::GenericEmbed {
                url: url.to_string()
            }
        );
    }

    #[test]
    fn direct_files_case_insensitive() {
        for url in [
            "https://example.com/clip.mp4",
            "https://example.com/clip.MP4",
            "https://example.com/clip.webm",
            "https://example.com/clip.ogv",
        ] {
            assert_eq!(
                resolve(url),
                PlaybackSource::DirectFile {
                    url: url.to_string()
                }
            );
        }
    }

    #[test]
    fn unknown_site_is_generic_embed() {
        let url = "https://example.com/page";
        assert_eq!(
            resolve(url),
            PlaybackSource::GenericEmbed {
                url: url.to_string()
            }
        );
    }

    #[test]
    fn youtube_wins_over_file_extension() {
        assert_eq!(
            resolve("https://youtube.com/videos/clip.mp4").kind(),
            "youtube_external_only"
        );
        assert_eq!(
            resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ&f=x.mp4").kind(),
            "youtube_embed"
        );
    }

    #[test]
    fn resolving_twice_is_identical() {
        let resolver = VideoSourceResolver::with_origin("https://a.example");
        for url in [
            "",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtube.com/nope",
            "https://vimeo.com/1",
            "https://example.com/a.webm",
            "not a url at all",
        ] {
            assert_eq!(resolver.resolve(url), resolver.resolve(url));
        }
    }

    #[test]
    fn malformed_input_never_panics() {
        for url in ["::::", "youtu.be", "vimeo.com/", ".mp4", "\u{1F3AC}", "?v=dQw4w9WgXcQ"] {
            let _ = resolve(url);
        }
        assert_eq!(resolve(".mp4").kind(), "direct_file");
    }

    #[test]
    fn resolver_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VideoSourceResolver>();
    }
}
