//! Tests for the artwork catalog and site routing over the fixture archive.

use std::sync::Arc;

use ansimirror::site::Response;
use ansimirror::{Catalog, Pacing, Site, TimingMode};

use super::helpers::pack_dir;

fn site() -> Site {
    let catalog = Catalog::scan(pack_dir()).unwrap();
    Site::new(
        Arc::new(catalog),
        "ansi.example.org",
        Pacing::new(9600, TimingMode::PerLine),
    )
}

#[test]
fn scan_registers_nested_files_by_basename() {
    let catalog = Catalog::scan(pack_dir()).unwrap();
    let names: Vec<&str> = catalog.names().collect();
    assert_eq!(names, vec!["blocks.ans", "wide.ans"]);
}

#[test]
fn first_duplicate_in_sorted_order_wins() {
    let catalog = Catalog::scan(pack_dir()).unwrap();
    let path = catalog.get("blocks.ans").unwrap();
    assert!(path.ends_with("2019/blocks.ans"));
}

#[test]
fn scan_of_missing_root_fails() {
    let err = Catalog::scan(pack_dir().join("nope")).unwrap_err();
    assert!(err.to_string().contains("Artwork directory not found"));
}

#[test]
fn front_page_mentions_host_and_count() {
    let Response::Page { mime, body } = site().respond("") else {
        panic!("expected a page");
    };
    assert_eq!(mime, "text/gemini");
    assert!(body.starts_with("gemini://ansi.example.org/\n"));
    assert!(body.contains("9600 bps (line)"));
}

#[test]
fn list_page_counts_works() {
    let Response::Page { body, .. } = site().respond("/list/") else {
        panic!("expected a page");
    };
    assert!(body.starts_with("# 2 works of art\n"));
    assert!(body.contains("* blocks.ans\n"));
    assert!(body.contains("* wide.ans\n"));
}

#[test]
fn speed_prefixes_select_pacing() {
    let pacing_of = |path: &str| match site().respond(path) {
        Response::Artwork { pacing, .. } => pacing,
        other => panic!("expected artwork, got {other:?}"),
    };

    assert_eq!(pacing_of("/wide.ans"), Pacing::new(9600, TimingMode::PerLine));
    assert_eq!(pacing_of("/quick/wide.ans"), Pacing::Unthrottled);
    assert_eq!(pacing_of("/b=1200/wide.ans"), Pacing::new(1200, TimingMode::PerLine));
    assert_eq!(
        pacing_of("/s=14400/wide.ans"),
        Pacing::new(14400, TimingMode::PerCharacter)
    );
}

#[test]
fn bad_rates_are_client_errors() {
    for path in ["/b=0/wide.ans", "/s=-1/wide.ans", "/b=fast/wide.ans", "/b=99999999999/wide.ans"] {
        assert!(
            matches!(site().respond(path), Response::BadRequest(_)),
            "{path} should be rejected"
        );
    }
}
