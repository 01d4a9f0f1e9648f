use anyhow::Result;
use serde::Serialize;

use ava::{Affordance, PlaybackSource};

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Cut `text` to at most `max` characters, marking the cut with `...`.
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

pub fn print_source(source: &PlaybackSource) {
    println!("🎬 Source: {}", source.kind());
    match source {
        PlaybackSource::YouTubeEmbed {
            video_id,
            embed_url,
        }
        | PlaybackSource::VimeoEmbed {
            video_id,
            embed_url,
        } => {
            println!("   Video ID: {video_id}");
            println!("   Embed URL: {embed_url}");
        }
        PlaybackSource::YouTubeExternalOnly { original_url } => {
            println!("   Open externally: {original_url}");
        }
        PlaybackSource::DirectFile { url } | PlaybackSource::GenericEmbed { url } => {
            println!("   URL: {url}");
        }
        PlaybackSource::Empty => {
            println!("   No video link");
        }
    }

    let element = match Affordance::from(source) {
        Affordance::Frame { .. } => "frame",
        Affordance::MediaElement { .. } => "media element",
        Affordance::ExternalLink { .. } => "external link",
        Affordance::Unavailable => "none",
    };
    println!("   Render as: {element}");
}
