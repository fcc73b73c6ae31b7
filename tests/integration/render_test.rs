//! Tests for rendering real artwork files.

use std::time::Duration;

use ansimirror::render::ManualClock;
use ansimirror::{Pacing, RenderError, Renderer, TimingMode};

use super::helpers::{pack_dir, temp_fixture};

fn render_all(path: &std::path::Path) -> String {
    let bytes: Vec<u8> = Renderer::open(path, Pacing::Unthrottled)
        .unwrap()
        .flat_map(|chunk| chunk.unwrap().bytes)
        .collect();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn blocks_are_transcoded() {
    assert_eq!(
        render_all(&pack_dir().join("2019/blocks.ans")),
        "\x1b[0;1;33m██░▒▓\x1b[0m\r\n╔═╗\r\n"
    );
}

#[test]
fn wide_line_wraps_at_eighty_columns() {
    let mut expected = "A".repeat(80);
    expected.push_str("\r\n");
    expected.push_str(&"A".repeat(20));
    expected.push_str("\r\n");
    assert_eq!(render_all(&pack_dir().join("2020/wide.ans")), expected);
}

#[test]
fn rendering_a_copy_matches_original() {
    let (_dir, path) = temp_fixture("pack/2019/blocks.ans");
    assert_eq!(render_all(&path), render_all(&pack_dir().join("2019/blocks.ans")));
}

#[test]
fn per_line_pacing_over_a_file() {
    let file = std::fs::File::open(pack_dir().join("2020/wide.ans")).unwrap();
    let clock = ManualClock::new();
    let mut total = Duration::ZERO;
    let mut lines = 0;

    for chunk in Renderer::with_clock(file, Pacing::new(2400, TimingMode::PerLine), &clock) {
        let chunk = chunk.unwrap();
        clock.advance(chunk.wait);
        total += chunk.wait;
        if !chunk.bytes.is_empty() {
            lines += 1;
        }
    }

    // The wrap and the trailing line feed: 2 lines of 300 ms at 2400 bps.
    assert_eq!(lines, 2);
    assert_eq!(total, Duration::from_millis(600));
}

#[test]
fn missing_file_is_source_unavailable() {
    let err = Renderer::open(pack_dir().join("missing.ans"), Pacing::Unthrottled).unwrap_err();
    assert!(matches!(err, RenderError::SourceUnavailable { .. }));
    assert!(err.to_string().contains("missing.ans"));
}
