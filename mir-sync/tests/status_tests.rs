mod common;

use std::fs;

use mir_sync::{aggregate, Outcome, Summary};
use rstest::rstest;
use tempfile::TempDir;

use common::{commit_file, git, init_repo, record, registry};

#[test]
fn missing_alpha_and_clean_beta() {
    let Some(git) = git() else { return };
    let root = TempDir::new().unwrap();
    let beta = root.path().join("beta");
    init_repo(&beta);
    commit_file(&beta, "README.md", "Initial commit: beta");

    let reg = registry(vec![
        record("beta", &beta),
        record("alpha", root.path().join("alpha")),
    ]);
    let entries = aggregate(&git, &reg);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name.as_str(), "alpha");
    assert_eq!(entries[0].outcome, Outcome::MissingPath);
    assert_eq!(entries[1].name.as_str(), "beta");
    match &entries[1].outcome {
        Outcome::Repo(status) => assert_eq!(status.dirty(), Some(false)),
        other => panic!("expected a repo, got {other:?}"),
    }
}

#[rstest]
#[case(&["c", "a", "b"])]
#[case(&["b", "c", "a"])]
#[case(&["a", "b", "c"])]
#[case(&["c", "b", "a"])]
fn sorted_for_any_stored_order(#[case] order: &[&str]) {
    let Some(git) = git() else { return };
    let root = TempDir::new().unwrap();
    let reg = registry(
        order
            .iter()
            .map(|name| record(name, root.path().join(name)))
            .collect(),
    );

    let names: Vec<String> = aggregate(&git, &reg)
        .into_iter()
        .map(|e| e.name.to_string())
        .collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn mixed_registry_summary() {
    let Some(git) = git() else { return };
    let root = TempDir::new().unwrap();

    let dirty = root.path().join("dirty");
    init_repo(&dirty);
    commit_file(&dirty, "a.txt", "one");
    fs::write(dirty.join("b.txt"), "new").unwrap();

    let fresh = root.path().join("fresh");
    init_repo(&fresh);
    fs::write(fresh.join("draft.md"), "wip").unwrap();

    let plain = root.path().join("plain");
    fs::create_dir_all(&plain).unwrap();

    let reg = registry(vec![
        record("plain", &plain),
        record("fresh", &fresh),
        record("dirty", &dirty),
        record("gone", root.path().join("gone")),
    ]);
    let entries = aggregate(&git, &reg);

    assert_eq!(
        Summary::of(&entries),
        Summary {
            projects: 4,
            dirty: 2,
            missing: 1
        }
    );
    let fresh_entry = entries.iter().find(|e| e.name.as_str() == "fresh").unwrap();
    match &fresh_entry.outcome {
        Outcome::Repo(status) => {
            assert_eq!(status.change_count(), Some(1));
            assert_eq!(status.last_commit, None);
        }
        other => panic!("expected a repo, got {other:?}"),
    }
    let plain_entry = entries.iter().find(|e| e.name.as_str() == "plain").unwrap();
    assert_eq!(plain_entry.outcome, Outcome::NotARepo);
}
