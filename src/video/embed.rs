//! Mapping from playback sources to the element a page should render.

use serde::Serialize;

use super::patterns;
use super::source::PlaybackSource;

/// Permissions granted to provider player frames.
pub const FRAME_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

/// Concrete playback element for a [`PlaybackSource`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum Affordance {
    /// Embedded frame (provider player or best-effort generic page).
    Frame { src: String },
    /// Native media element.
    MediaElement { src: String, mime: &'static str },
    /// Inline playback refused, offer a link that opens in a new tab.
    ExternalLink { href: String },
    /// Nothing to play.
    Unavailable,
}

impl From<&PlaybackSource> for Affordance {
    fn from(source: &PlaybackSource) -> Self {
        match source {
            PlaybackSource::YouTubeEmbed { embed_url, .. }
            | PlaybackSource::VimeoEmbed { embed_url, .. } => Self::Frame {
                src: embed_url.clone(),
            },
            PlaybackSource::GenericEmbed { url } => Self::Frame { src: url.clone() },
            PlaybackSource::DirectFile { url } => Self::MediaElement {
                src: url.clone(),
                mime: mime_for(url),
            },
            PlaybackSource::YouTubeExternalOnly { original_url } => Self::ExternalLink {
                href: original_url.clone(),
            },
            PlaybackSource::Empty => Self::Unavailable,
        }
    }
}

fn mime_for(url: &str) -> &'static str {
    match patterns::direct_file_extension(url) {
        Some("webm") => "video/webm",
        Some("ogv") => "video/ogg",
        _ => "video/mp4",
    }
}

impl Affordance {
    /// Render as an HTML fragment. `title` labels the frame for assistive tech.
    pub fn to_html(&self, title: &str) -> String {
        match self {
            Self::Frame { src } => format!(
                r#"<iframe src="{}" title="{}" allow="{FRAME_ALLOW}" allowfullscreen></iframe>"#,
                escape(src),
                escape(title)
            ),
            Self::MediaElement { src, mime } => format!(
                r#"<video controls autoplay><source src="{}" type="{mime}"></video>"#,
                escape(src)
            ),
            Self::ExternalLink { href } => format!(
                r#"<p>This video cannot be played here.</p><a href="{}" target="_blank" rel="noopener noreferrer">Watch on YouTube</a>"#,
                escape(href)
            ),
            Self::Unavailable => "<p>Invalid or empty video link.</p>".to_string(),
        }
    }
}

/// Escape text for use in HTML attribute values and element content.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
