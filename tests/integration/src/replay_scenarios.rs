//! End-to-end replay scenarios
//!
//! Each test runs the full flow: store on disk -> orchestrator -> working
//! copy ledger -> check-in.

use pretty_assertions::assert_eq;
use replay_core::{
    ChangeFlag, Changeset, ChangesetRecord, LocalWorkspace, MemoryLog, PathMap, PendingKind,
    ReplicationOrchestrator, ReplicationResult, WorkingCopy, plan_check_in,
};
use replay_test_utils::scenario::{StoreFixture, add_and_delete_changeset};
use std::fs;
use tempfile::TempDir;

fn replay(
    store: &StoreFixture,
    id: u32,
    workspace: &mut LocalWorkspace,
    map: &PathMap,
) -> (ReplicationResult, MemoryLog) {
    let changeset = replay_core::ChangesetSource::changeset(store.store(), id).unwrap();
    let root = workspace.root().to_path_buf();
    let mut log = MemoryLog::new();
    let result = ReplicationOrchestrator::new(store.store(), &mut log)
        .run(&changeset, "$/Proj", map, &root, workspace)
        .unwrap();
    (result, log)
}

fn commit(
    store: &StoreFixture,
    id: u32,
    workspace: &mut LocalWorkspace,
    result: &ReplicationResult,
) -> u32 {
    let changeset = replay_core::ChangesetSource::changeset(store.store(), id).unwrap();
    let plan = plan_check_in(&*workspace, &changeset, result).unwrap();
    workspace.check_in(&plan.changes, &plan.comment).unwrap()
}

#[test]
fn test_replay_and_check_in() {
    let store = StoreFixture::new();
    store.add(&add_and_delete_changeset(), &[("$/Proj/src/a.txt", "alpha\n")]);

    let dest = TempDir::new().unwrap();
    fs::create_dir_all(dest.path().join("src")).unwrap();
    fs::write(dest.path().join("src").join("b.txt"), "old").unwrap();
    let mut workspace = LocalWorkspace::init(dest.path()).unwrap();

    let (result, log) = replay(&store, 100, &mut workspace, &PathMap::new());

    let a = dest.path().join("src").join("a.txt");
    let b = dest.path().join("src").join("b.txt");
    assert_eq!(result.changed_paths, vec![a.clone(), b.clone()]);
    assert!(log.errors().is_empty());

    // Deletes are staged, not applied
    assert!(b.exists());

    let id = commit(&store, 100, &mut workspace, &result);
    assert_eq!(id, 1);
    assert!(!b.exists());
    assert_eq!(fs::read_to_string(&a).unwrap(), "alpha\n");

    let reopened = LocalWorkspace::open(dest.path()).unwrap();
    assert!(reopened.pending().is_empty());
    let entry = &reopened.history()[0];
    assert_eq!(
        entry.comment,
        "Original changeset 100, committed by jdoe, was moved to this location.\n\nOriginal comment:\nAdd a, drop b"
    );
    let kinds: Vec<_> = entry.changes.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![PendingKind::Add, PendingKind::Delete]);
}

#[test]
fn test_sequence_of_changesets() {
    let store = StoreFixture::new();
    store.add(
        &Changeset {
            id: 10,
            committer: "ann".into(),
            comment: "create".into(),
            records: vec![
                ChangesetRecord::directory("$/Proj/docs", ChangeFlag::Add),
                ChangesetRecord::file("$/Proj/docs/readme.md", ChangeFlag::Add),
            ],
        },
        &[("$/Proj/docs/readme.md", "v1")],
    );
    store.add(
        &Changeset {
            id: 11,
            committer: "bob".into(),
            comment: "update".into(),
            records: vec![ChangesetRecord::file(
                "$/Proj/docs/readme.md",
                ChangeFlag::Edit,
            )],
        },
        &[("$/Proj/docs/readme.md", "v2")],
    );
    store.add(
        &Changeset {
            id: 12,
            committer: "ann".into(),
            comment: "remove".into(),
            records: vec![ChangesetRecord::file(
                "$/Proj/docs/readme.md",
                ChangeFlag::Delete,
            )],
        },
        &[],
    );

    let dest = TempDir::new().unwrap();
    let mut workspace = LocalWorkspace::init(dest.path()).unwrap();
    let readme = dest.path().join("docs").join("readme.md");

    let (result, _) = replay(&store, 10, &mut workspace, &PathMap::new());
    assert_eq!(result.changed_paths.len(), 2);
    assert_eq!(commit(&store, 10, &mut workspace, &result), 1);

    let (result, _) = replay(&store, 11, &mut workspace, &PathMap::new());
    assert_eq!(fs::read_to_string(&readme).unwrap(), "v2");
    assert_eq!(workspace.pending()[0].kind, PendingKind::Edit);
    assert_eq!(commit(&store, 11, &mut workspace, &result), 2);

    let (result, _) = replay(&store, 12, &mut workspace, &PathMap::new());
    assert_eq!(commit(&store, 12, &mut workspace, &result), 3);
    assert!(!readme.exists());
    assert!(dest.path().join("docs").is_dir());
    assert_eq!(workspace.history().len(), 3);
}

#[test]
fn test_replaying_twice_gives_same_tree() {
    let store = StoreFixture::new();
    store.add(&add_and_delete_changeset(), &[("$/Proj/src/a.txt", "alpha\n")]);

    let dest = TempDir::new().unwrap();
    let mut workspace = LocalWorkspace::init(dest.path()).unwrap();

    let (first, _) = replay(&store, 100, &mut workspace, &PathMap::new());
    let (second, _) = replay(&store, 100, &mut workspace, &PathMap::new());

    // b.txt was never present, so only a.txt is touched both times
    assert_eq!(first.changed_paths, second.changed_paths);
    assert_eq!(workspace.pending().len(), 1);
    assert_eq!(workspace.pending()[0].kind, PendingKind::Add);
    assert_eq!(
        fs::read_to_string(dest.path().join("src").join("a.txt")).unwrap(),
        "alpha\n"
    );
}

#[test]
fn test_path_map_from_file() {
    let store = StoreFixture::new();
    store.add(&add_and_delete_changeset(), &[("$/Proj/src/a.txt", "alpha\n")]);

    let dest = TempDir::new().unwrap();
    let map_file = dest.path().join("paths.map");
    fs::write(&map_file, "# old layout\nSRC,lib\n").unwrap();
    let map = PathMap::load(&map_file).unwrap();

    let mut workspace = LocalWorkspace::init(dest.path()).unwrap();
    let (result, _) = replay(&store, 100, &mut workspace, &map);

    let moved = dest.path().join("lib").join("a.txt");
    assert_eq!(result.changed_paths, vec![moved.clone()]);
    assert!(moved.is_file());
}

#[test]
fn test_unhandled_flags_are_not_replayed() {
    let store = StoreFixture::new();
    store.add(
        &Changeset {
            id: 20,
            committer: "cy".into(),
            comment: "rename only".into(),
            records: vec![
                ChangesetRecord::file("$/Proj/x.txt", ChangeFlag::Rename),
                ChangesetRecord::file("$/Proj/y.txt", ChangeFlag::Rename | ChangeFlag::Edit),
            ],
        },
        &[("$/Proj/y.txt", "why")],
    );

    let dest = TempDir::new().unwrap();
    let mut workspace = LocalWorkspace::init(dest.path()).unwrap();
    let (result, log) = replay(&store, 20, &mut workspace, &PathMap::new());

    assert_eq!(result.changed_paths, vec![dest.path().join("y.txt")]);
    assert!(!dest.path().join("x.txt").exists());
    assert!(log.errors().is_empty());
}

#[test]
fn test_flattening_map_writes_inside_destination() {
    let store = StoreFixture::new();
    store.add(&add_and_delete_changeset(), &[("$/Proj/src/a.txt", "alpha\n")]);

    let dest = TempDir::new().unwrap();
    let map = PathMap::parse("src,\n").unwrap();
    let mut workspace = LocalWorkspace::init(dest.path()).unwrap();
    let (result, _) = replay(&store, 100, &mut workspace, &map);

    let flat = dest.path().join("a.txt");
    assert_eq!(result.changed_paths, vec![flat.clone()]);
    assert_eq!(fs::read_to_string(&flat).unwrap(), "alpha\n");
    assert_eq!(workspace.pending()[0].local_path, flat);
}
