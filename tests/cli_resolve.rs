//! Integration tests for `ava resolve` and `ava embed`.
//!
//! These never touch the network, so they run with an empty config file and
//! the `AVA_*` variables cleared.

#![allow(deprecated)] // cargo_bin deprecation — replacement not yet stable

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

const ENV_VARS: &[&str] = &[
    "AVA_BACKEND_URL",
    "AVA_API_KEY",
    "AVA_ACCESS_TOKEN",
    "AVA_ORIGIN",
    "AVA_USER_ID",
    "AVA_USER_ROLE",
];

fn empty_config(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("ava-test-{}-{name}.toml", std::process::id()));
    std::fs::write(&path, "").expect("write temp config");
    path
}

fn ava(config: &str) -> Command {
    let mut cmd = Command::cargo_bin("ava").expect("binary 'ava' should be built");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("--config").arg(empty_config(config));
    cmd
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("run ava");
    assert!(output.status.success(), "ava failed: {output:?}");
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ─── resolve ─────────────────────────────────────────────────────────────────

#[test]
fn resolve_youtube_watch_url() {
    ava("yt-watch")
        .args(["resolve", "https://www.youtube.com/watch?v=dQw4w9WgXcQ"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Source: youtube_embed"))
        .stdout(predicate::str::contains("Video ID: dQw4w9WgXcQ"))
        .stdout(predicate::str::contains("Render as: frame"));
}

#[test]
fn resolve_json_uses_kind_tag() {
    let value = json_output(ava("yt-json").args([
        "resolve",
        "https://youtu.be/dQw4w9WgXcQ",
        "--origin",
        "https://ava.example",
        "--format",
        "json",
    ]));
    assert_eq!(value["kind"], "youtube_embed");
    assert_eq!(value["video_id"], "dQw4w9WgXcQ");
    assert_eq!(
        value["embed_url"],
        "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&origin=https://ava.example"
    );
}

#[test]
fn resolve_unparseable_youtube_is_external_only() {
    let url = "https://www.youtube.com/watch?v=short";
    let value = json_output(ava("yt-external").args(["resolve", url, "-f", "json"]));
    assert_eq!(value["kind"], "youtube_external_only");
    assert_eq!(value["original_url"], url);
}

#[test]
fn resolve_vimeo() {
    let value = json_output(ava("vimeo").args(["resolve", "https://vimeo.com/76979871", "-f", "json"]));
    assert_eq!(value["kind"], "vimeo_embed");
    assert_eq!(value["video_id"], "76979871");
    assert_eq!(value["embed_url"], "https://player.vimeo.com/video/76979871?autoplay=1");
}

#[test]
fn resolve_direct_file() {
    ava("direct")
        .args(["resolve", "https://cdn.example.com/aula1.MP4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Source: direct_file"))
        .stdout(predicate::str::contains("Render as: media element"));
}

#[test]
fn resolve_generic_page() {
    let value = json_output(ava("generic").args(["resolve", "https://example.com/page", "-f", "json"]));
    assert_eq!(value["kind"], "generic_embed");
    assert_eq!(value["url"], "https://example.com/page");
}

#[test]
fn resolve_blank_is_empty() {
    ava("blank")
        .args(["resolve", "   "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Source: empty"))
        .stdout(predicate::str::contains("No video link"));
}

#[test]
fn origin_comes_from_environment() {
    let value = json_output(
        ava("env-origin")
            .env("AVA_ORIGIN", "https://portal.example/aulas")
            .args(["resolve", "https://youtu.be/dQw4w9WgXcQ", "-f", "json"]),
    );
    assert_eq!(
        value["embed_url"],
        "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&origin=https://portal.example"
    );
}

#[test]
fn missing_explicit_config_fails() {
    Command::cargo_bin("ava")
        .expect("binary 'ava' should be built")
        .args(["--config", "/nonexistent/ava/config.toml", "resolve", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

// ─── embed ───────────────────────────────────────────────────────────────────

#[test]
fn embed_youtube_prints_iframe() {
    ava("embed-yt")
        .args(["embed", "https://youtu.be/dQw4w9WgXcQ", "--title", "Aula 1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<iframe"))
        .stdout(predicate::str::contains("/embed/dQw4w9WgXcQ?autoplay=1&amp;origin="))
        .stdout(predicate::str::contains(r#"title="Aula 1""#));
}

#[test]
fn embed_direct_file_prints_video_element() {
    ava("embed-webm")
        .args(["embed", "https://cdn.example.com/aula.webm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<video controls"))
        .stdout(predicate::str::contains(r#"type="video/webm""#));
}

#[test]
fn embed_external_only_prints_link() {
    ava("embed-external")
        .args(["embed", "https://youtube.com/watch?v=bad"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Watch on YouTube"))
        .stdout(predicate::str::contains("<iframe").not());
}

#[test]
fn embed_empty_reports_invalid_link() {
    ava("embed-empty")
        .args(["embed", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid or empty video link"));
}
