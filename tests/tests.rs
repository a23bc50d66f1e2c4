//! Integration tests for `fanfic_analysis`.
//
// This suite verifies:
// - Library behavior on a real on-disk project (metadata collection,
//   HTML cleanup, frequency counting, pairing aggregation)
// - CLI behavior of both binaries, including argument validation and the
//   non-zero exit contract on failure
//
// Notes:
// - Each test builds its own throwaway project; no global state is shared.

use std::fs;
use std::path::PathBuf;

use assert_cmd::prelude::*;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::json;

use fanfic_analysis::{
    CountConfig, Project, collect_pairing_data, combined_text, count_words, include_in_cloud,
};

// --------------------- helpers ---------------------

/// Write one story (metadata + content) into a project dir.
fn write_story(dir: &TempDir, site: &str, id: &str, metadata: serde_json::Value, html: &str) {
    let story = dir.child(format!("fanfics/{site}/{id}"));
    story
        .child("metadata.json")
        .write_str(&metadata.to_string())
        .unwrap();
    story.child("story.html").write_str(html).unwrap();
}

/// Minimal valid metadata with overridable fields.
fn metadata(site: &str, id: &str, language: &str, ships: serde_json::Value) -> serde_json::Value {
    json!({
        "language": language,
        "siteabbrev": site,
        "storyId": id,
        "rating": "T",
        "ships": ships,
        "reviews": 3,
        "follows": 5,
        "favs": 7,
        "numWords": 1000,
        "numChapters": 2,
    })
}

fn run_ok(bin: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = assert_cmd::Command::cargo_bin(bin).unwrap();
    cmd.args(args).assert().success()
}

fn run_fail(bin: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = assert_cmd::Command::cargo_bin(bin).unwrap();
    cmd.args(args).assert().failure()
}

// --------------------- library tests ---------------------

#[test]
fn lib_collects_metadata_in_path_order() {
    let dir = TempDir::new().unwrap();
    write_story(&dir, "bb", "2", metadata("bb", "2", "English", json!([])), "");
    write_story(&dir, "aa", "9", metadata("aa", "9", "German", json!([])), "");
    write_story(&dir, "aa", "1", metadata("aa", "1", "english", json!([])), "");

    let project = Project::open(dir.path()).unwrap();
    let all = project.collect_metadata().unwrap();
    let ids: Vec<&str> = all.iter().map(|m| m.story_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "9", "2"]);

    let english: Vec<&str> = all
        .iter()
        .filter(|m| include_in_cloud(m))
        .map(|m| m.story_id.as_str())
        .collect();
    assert_eq!(english, vec!["1", "2"]);
}

#[test]
fn lib_malformed_metadata_aborts_collection() {
    let dir = TempDir::new().unwrap();
    dir.child("fanfics/aa/1/metadata.json")
        .write_str("{ not json")
        .unwrap();
    let project = Project::open(dir.path()).unwrap();
    let err = project.collect_metadata().unwrap_err();
    assert!(err.contains("metadata.json"));
}

#[test]
fn lib_wordcloud_pipeline_counts_cleaned_text() {
    let dir = TempDir::new().unwrap();
    write_story(
        &dir,
        "aa",
        "1",
        metadata("aa", "1", "English", json!([])),
        "<html><body><p>The cat sat. The cat ran!</p></body></html>",
    );
    write_story(
        &dir,
        "aa",
        "2",
        metadata("aa", "2", "French", json!([])),
        "<p>chat chat chat</p>",
    );

    let project = Project::open(dir.path()).unwrap();
    let stories: Vec<_> = project
        .collect_metadata()
        .unwrap()
        .into_iter()
        .filter(include_in_cloud)
        .collect();
    assert_eq!(stories.len(), 1);

    let text = combined_text(&project, &stories).unwrap();
    let frequencies = count_words(&text, &CountConfig::default());

    // The French story is filtered out entirely.
    assert!(frequencies.single.get("chat").is_none());

    // "the" is ignored, punctuation is stripped, and pairs run over the
    // filtered stream.
    assert_eq!(frequencies.single["cat"], 2);
    assert_eq!(frequencies.single["sat"], 1);
    assert_eq!(frequencies.single["ran"], 1);
    assert_eq!(frequencies.pairs["cat sat"], 1);
    assert_eq!(frequencies.pairs["sat cat"], 1);
    assert_eq!(frequencies.pairs["cat ran"], 1);
}

#[test]
fn lib_missing_story_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let story = dir.child("fanfics/aa/1");
    story
        .child("metadata.json")
        .write_str(&metadata("aa", "1", "English", json!([])).to_string())
        .unwrap();
    // no story.html

    let project = Project::open(dir.path()).unwrap();
    let stories = project.collect_metadata().unwrap();
    let err = combined_text(&project, &stories).unwrap_err();
    assert!(err.contains("story.html"));
}

#[test]
fn lib_pairing_aggregation_over_project() {
    let dir = TempDir::new().unwrap();
    write_story(
        &dir,
        "aa",
        "1",
        metadata("aa", "1", "English", json!([["Bob", "Alice"], ["Cleo", "Dan"]])),
        "",
    );
    write_story(
        &dir,
        "aa",
        "2",
        metadata("aa", "2", "English", json!([["Alice", "Bob"]])),
        "",
    );

    let project = Project::open(dir.path()).unwrap();
    let stories = project.collect_metadata().unwrap();
    let data = collect_pairing_data(&stories, false);

    let ab = &data.stats[&("Alice".to_string(), "Bob".to_string())];
    assert_eq!(ab.occurences, 2);
    assert_eq!(ab.words, 2000);

    // Only the first story carries more than one pairing.
    assert_eq!(data.correlation.len(), 1);
    let key = ("Alice/Bob".to_string(), "Cleo/Dan".to_string());
    assert_eq!(data.correlation[&key].occurences, 2);
}

// --------------------- make_wordcloud CLI ---------------------

#[test]
fn cli_wordcloud_writes_image() {
    let dir = TempDir::new().unwrap();
    write_story(
        &dir,
        "aa",
        "1",
        metadata("aa", "1", "English", json!([])),
        "<p>stars drift over quiet harbors while sailors dream of stars \
         and harbors and lanterns burn along the pier</p>",
    );
    let out = dir.path().join("cloud.png");

    run_ok(
        "make_wordcloud",
        &[dir.path().to_str().unwrap(), out.to_str().unwrap()],
    );
    let written = fs::read(&out).unwrap();
    assert!(!written.is_empty());
    assert_eq!(&written[1..4], b"PNG");
}

#[test]
fn cli_wordcloud_missing_project_fails() {
    let dir = TempDir::new().unwrap();
    let missing: PathBuf = dir.path().join("nope");
    run_fail(
        "make_wordcloud",
        &[missing.to_str().unwrap(), "out.png"],
    )
    .stderr(predicate::str::contains("not an archive project"));
}

#[test]
fn cli_wordcloud_without_stories_fails() {
    let dir = TempDir::new().unwrap();
    write_story(
        &dir,
        "aa",
        "1",
        metadata("aa", "1", "German", json!([])),
        "<p>nur deutsch</p>",
    );
    let out = dir.path().join("cloud.png");
    run_fail(
        "make_wordcloud",
        &[dir.path().to_str().unwrap(), out.to_str().unwrap()],
    )
    .stderr(predicate::str::contains("Empty frequency table"));
}

// --------------------- pairing_analyzer CLI ---------------------

#[test]
fn cli_pairing_analyzer_writes_chord_html() {
    let dir = TempDir::new().unwrap();
    write_story(
        &dir,
        "aa",
        "1",
        metadata("aa", "1", "English", json!([["Bob", "Alice"], ["Cleo", "Dan"]])),
        "",
    );
    let out = dir.path().join("ships.html");

    run_ok(
        "pairing_analyzer",
        &[
            dir.path().to_str().unwrap(),
            out.to_str().unwrap(),
            "stats",
            "occurences",
        ],
    );
    let page = fs::read_to_string(&out).unwrap();
    assert!(page.contains("Alice"));
    assert!(page.contains("Dan"));
    assert!(page.contains("d3.chord"));
}

#[test]
fn cli_pairing_analyzer_prints_data() {
    let dir = TempDir::new().unwrap();
    write_story(
        &dir,
        "aa",
        "1",
        metadata("aa", "1", "English", json!([["Bob", "Alice"]])),
        "",
    );
    let out = dir.path().join("ships.html");

    run_ok(
        "pairing_analyzer",
        &[
            dir.path().to_str().unwrap(),
            out.to_str().unwrap(),
            "stats",
            "follows",
            "-p",
        ],
    )
    .stdout(predicate::str::contains("Alice/Bob"))
    .stdout(predicate::str::contains("\"follows\": 5"));
}

#[test]
fn cli_pairing_analyzer_adult_only_filters_everything() {
    let dir = TempDir::new().unwrap();
    // rating "T" is excluded by --adult-only, leaving nothing to draw
    write_story(
        &dir,
        "aa",
        "1",
        metadata("aa", "1", "English", json!([["Bob", "Alice"]])),
        "",
    );
    let out = dir.path().join("ships.html");
    run_fail(
        "pairing_analyzer",
        &[
            dir.path().to_str().unwrap(),
            out.to_str().unwrap(),
            "stats",
            "occurences",
            "--adult-only",
        ],
    )
    .stderr(predicate::str::contains("nothing to draw"));
}

#[test]
fn cli_pairing_analyzer_rejects_key_not_in_correlation() {
    let dir = TempDir::new().unwrap();
    write_story(
        &dir,
        "aa",
        "1",
        metadata("aa", "1", "English", json!([["Bob", "Alice"], ["Cleo", "Dan"]])),
        "",
    );
    let out = dir.path().join("ships.html");
    run_fail(
        "pairing_analyzer",
        &[
            dir.path().to_str().unwrap(),
            out.to_str().unwrap(),
            "correlation",
            "follows",
        ],
    )
    .stderr(predicate::str::contains("occurences"));
}

#[test]
fn cli_pairing_analyzer_rejects_unknown_masterkey() {
    run_fail(
        "pairing_analyzer",
        &["proj", "out.html", "everything", "occurences"],
    )
    .stderr(predicate::str::contains("invalid value"));
}
