//! Benchmarks for `VideoSourceResolver` dispatch.
//!
//! Measures the cost of the ordered rule table for each kind of lesson link
//! and the pattern helpers it is built on.
//!
//! Run with: `cargo bench --bench resolver_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ava::video::patterns::{direct_file_extension, vimeo_id, youtube_id};
use ava::{Affordance, VideoSourceResolver};

// ---------------------------------------------------------------------------
// URL datasets
// ---------------------------------------------------------------------------

const YOUTUBE_URLS: &[&str] = &[
    "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
    "https://youtu.be/dQw4w9WgXcQ?t=42",
    "https://www.youtube.com/embed/dQw4w9WgXcQ",
    "https://youtube.com/shorts/dQw4w9WgXcQ",
    "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
];

const YOUTUBE_BROKEN_URLS: &[&str] = &[
    "https://www.youtube.com/watch?v=short",
    "https://www.youtube.com/playlist?list=PL123",
    "https://youtu.be/",
];

const VIMEO_URLS: &[&str] = &[
    "https://vimeo.com/76979871",
    "https://vimeo.com/channels/staffpicks/76979871",
    "https://player.vimeo.com/video/76979871",
];

const DIRECT_URLS: &[&str] = &[
    "https://cdn.example.com/aulas/aula1.mp4",
    "https://cdn.example.com/aulas/aula2.webm?token=abc",
    "https://cdn.example.com/aulas/aula3.OGV",
];

/// Links that fall through every rule.
const GENERIC_URLS: &[&str] = &[
    "https://example.com/page",
    "https://drive.google.com/file/d/abc/view",
    "https://en.wikipedia.org/wiki/Liturgy",
    "https://docs.rs/regex/latest/regex/",
];

// ---------------------------------------------------------------------------
// Pattern helpers
// ---------------------------------------------------------------------------

fn bench_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("patterns");

    group.bench_function("youtube_id", |b| {
        b.iter(|| {
            for url in YOUTUBE_URLS {
                black_box(youtube_id(black_box(url)));
            }
        });
    });

    group.bench_function("vimeo_id", |b| {
        b.iter(|| {
            for url in VIMEO_URLS {
                black_box(vimeo_id(black_box(url)));
            }
        });
    });

    group.bench_function("direct_file_extension", |b| {
        b.iter(|| {
            for url in DIRECT_URLS {
                black_box(direct_file_extension(black_box(url)));
            }
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Full resolver (rules tried in order)
// ---------------------------------------------------------------------------

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let resolver = VideoSourceResolver::with_origin("https://ava.example");

    for (name, urls) in [
        ("youtube", YOUTUBE_URLS),
        ("youtube_external_only", YOUTUBE_BROKEN_URLS),
        ("vimeo", VIMEO_URLS),
        ("direct_file", DIRECT_URLS),
        ("generic", GENERIC_URLS),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                for url in urls {
                    black_box(resolver.resolve(black_box(url)));
                }
            });
        });
    }

    group.bench_function("empty", |b| {
        b.iter(|| black_box(resolver.resolve(black_box("   "))));
    });

    group.finish();
}

fn bench_affordance(c: &mut Criterion) {
    let resolver = VideoSourceResolver::with_origin("https://ava.example");
    let sources: Vec<_> = YOUTUBE_URLS
        .iter()
        .chain(DIRECT_URLS)
        .chain(YOUTUBE_BROKEN_URLS)
        .map(|url| resolver.resolve(url))
        .collect();

    c.bench_function("affordance_to_html", |b| {
        b.iter(|| {
            for source in &sources {
                black_box(Affordance::from(source).to_html(black_box("Aula")));
            }
        });
    });
}

criterion_group!(benches, bench_patterns, bench_resolve, bench_affordance);
criterion_main!(benches);
