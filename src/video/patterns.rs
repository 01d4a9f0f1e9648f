//! Provider URL patterns.
//!
//! Host names are matched case-insensitively, path keywords and ids are
//! matched as written.

use std::sync::LazyLock;

use regex::Regex;

/// Length of a YouTube video id.
pub const YOUTUBE_ID_LEN: usize = 11;

/// Extensions a browser can play natively in a media element.
pub const DIRECT_FILE_EXTENSIONS: &[&str] = &["mp4", "webm", "ogv"];

/// Recognizes watch, embed, v, shorts, live, youtu.be and
/// `youtube.com/<a>/<b>/<id>` shapes. Group 1 is the 11-character id, which
/// must be followed by a quote, `&`, `?`, `/`, `#`, whitespace or the end.
static YOUTUBE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:(?i:youtube\.com)/(?:[^/]+/.+/|(?:v|e(?:mbed)?|shorts|live)/|.*[?&]v=)|(?i:youtu\.be)/)([^"&?/\s]{11})(?:["&?/\s#]|$)"#,
    )
    .expect("YouTube pattern is valid")
});

/// Loose host check used after the structured match failed.
static YOUTUBE_HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)youtube\.com|youtu\.be").expect("YouTube host pattern is valid"));

/// `vimeo.com/<digits>` with optional channel, group, album or `video/` prefix.
static VIMEO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i:vimeo\.com)/(?:channels/(?:[A-Za-z0-9_]+/)?|groups/[^/]*/videos/|album/[0-9]+/video/|video/)?([0-9]+)",
    )
    .expect("Vimeo pattern is valid")
});

/// Extract a clean YouTube video id.
pub fn youtube_id(url: &str) -> Option<&str> {
    YOUTUBE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether the URL mentions a YouTube host anywhere.
pub fn mentions_youtube(url: &str) -> bool {
    YOUTUBE_HOST.is_match(url)
}

/// Extract a numeric Vimeo video id.
pub fn vimeo_id(url: &str) -> Option<&str> {
    VIMEO
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Path portion of a URL, without query string or fragment.
///
/// Works on relative and malformed URLs too, where a full parse would fail.
fn path_part(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

/// Lowercased direct-file extension of the URL path, if it is a playable one.
pub fn direct_file_extension(url: &str) -> Option<&'static str> {
    let path = path_part(url.trim_end());
    let (_, ext) = path.rsplit_once('.')?;
    DIRECT_FILE_EXTENSIONS
        .iter()
        .copied()
        .find(|known| ext.eq_ignore_ascii_case(known))
}
