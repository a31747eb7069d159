//! Scoring over resolved picks files on disk

use picks_common::picks::write_resolved_picks;
use picks_common::ResolvedPick;
use picks_score::{score_cohort, Cohort, ScoreError};
use tempfile::TempDir;

fn pick(title: &str, author: &str, year: Option<i32>) -> ResolvedPick {
    ResolvedPick {
        title: title.to_string(),
        author: author.to_string(),
        year,
    }
}

fn write(dir: &TempDir, slug: &str, picks: &[ResolvedPick]) {
    write_resolved_picks(&dir.path().join(format!("{}.csv", slug)), picks).unwrap();
}

#[test]
fn test_scores_from_csv_files() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "jane_doe",
        &[pick("Dune", "Frank Herbert", Some(1965)), pick("Beowulf", "Unknown", None)],
    );
    write(&dir, "john_roe", &[pick("Dune", "Frank Herbert", Some(1965))]);

    let cohort = Cohort::load(dir.path()).unwrap();
    assert_eq!(cohort.len(), 2);

    let scores = score_cohort(&cohort).unwrap();
    assert_eq!(
        scores,
        vec![("John Roe".to_string(), 1.0), ("Jane Doe".to_string(), 0.5)]
    );
}

#[test]
fn test_duplicates_block_scoring() {
    let dir = TempDir::new().unwrap();
    write(&dir, "ann", &[pick("The Brothers Karamazov", "Fyodor Dostoevsky", Some(1880))]);
    write(&dir, "bob", &[pick("Brothers Karamazov", "Fyodor Dostoevsky", Some(1880))]);

    let cohort = Cohort::load(dir.path()).unwrap();
    assert!(matches!(score_cohort(&cohort), Err(ScoreError::Duplicates(1))));
}

#[test]
fn test_empty_file_is_error() {
    let dir = TempDir::new().unwrap();
    write(&dir, "ann", &[pick("Emma", "Jane Austen", Some(1815))]);
    write(&dir, "bob", &[]);

    let cohort = Cohort::load(dir.path()).unwrap();
    assert!(matches!(score_cohort(&cohort), Err(ScoreError::EmptyPicks(name)) if name == "Bob"));
}

#[test]
fn test_missing_directory_is_empty_cohort() {
    let dir = TempDir::new().unwrap();
    let cohort = Cohort::load(&dir.path().join("absent")).unwrap();
    assert!(cohort.is_empty());
}
