//! Playback source classification result.

use serde::{Deserialize, Serialize};

/// How a lesson video can be played back.
///
/// Produced by [`VideoSourceResolver`](super::VideoSourceResolver). Every
/// input string maps to exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaybackSource {
    /// Clean YouTube video id, playable inline.
    #[serde(rename = "youtube_embed")]
    YouTubeEmbed { video_id: String, embed_url: String },
    /// Looked like YouTube but no clean 11-character id could be extracted.
    ///
    /// Must not be embedded inline: framing an unparsed YouTube URL ends in a
    /// refused connection inside the player frame.
    #[serde(rename = "youtube_external_only")]
    YouTubeExternalOnly { original_url: String },
    /// Numeric Vimeo video id, playable inline.
    VimeoEmbed { video_id: String, embed_url: String },
    /// Browser-playable media file, matched by extension.
    DirectFile { url: String },
    /// Unknown site. Best-effort frame embed, may render nothing.
    GenericEmbed { url: String },
    /// Blank or missing URL.
    Empty,
}

impl PlaybackSource {
    /// Stable lowercase name of the variant (matches the serde tag).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::YouTubeEmbed { .. } => "youtube_embed",
            Self::YouTubeExternalOnly { .. } => "youtube_external_only",
            Self::VimeoEmbed { .. } => "vimeo_embed",
            Self::DirectFile { .. } => "direct_file",
            Self::GenericEmbed { .. } => "generic_embed",
            Self::Empty => "empty",
        }
    }

    /// Whether the rendering layer should attempt inline playback.
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            Self::YouTubeEmbed { .. }
                | Self::VimeoEmbed { .. }
                | Self::DirectFile { .. }
                | Self::GenericEmbed { .. }
        )
    }

    /// URL to load inline, if any.
    pub fn inline_url(&self) -> Option<&str> {
        match self {
            Self::YouTubeEmbed { embed_url, .. } | Self::VimeoEmbed { embed_url, .. } => {
                Some(embed_url)
            }
            Self::DirectFile { url } | Self::GenericEmbed { url } => Some(url),
            Self::YouTubeExternalOnly { .. } | Self::Empty => None,
        }
    }

    /// URL to offer as an "open externally" link, if playback must leave the page.
    pub fn external_url(&self) -> Option<&str> {
        match self {
            Self::YouTubeExternalOnly { original_url } => Some(original_url),
            _ => None,
        }
    }

    /// Provider video id for YouTube and Vimeo embeds.
    pub fn video_id(&self) -> Option<&str> {
        match self {
            Self::YouTubeEmbed { video_id, .. } | Self::VimeoEmbed { video_id, .. } => {
                Some(video_id)
            }
            _ => None,
        }
    }
}
