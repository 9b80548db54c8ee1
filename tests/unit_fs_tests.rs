//! Unit tests for the disk-reclaim step: byte accounting, missing
//! entries and concurrent cells cleaning the same tree.

use fuzzmatrix::infra::fs::reclaim_disk_space;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn populated_tree(root: &TempDir) -> PathBuf {
    let tree = root.path().join("stale_cache");
    fs::create_dir_all(tree.join("nested")).unwrap();
    fs::write(tree.join("a.bin"), vec![0u8; 4096]).unwrap();
    fs::write(tree.join("nested/b.bin"), vec![0u8; 1024]).unwrap();
    tree
}

#[test]
fn test_reclaim_reports_bytes_and_removes_tree() {
    let root = TempDir::new().unwrap();
    let tree = populated_tree(&root);

    let reclaimed = reclaim_disk_space(&[&tree]).unwrap();
    assert!(reclaimed >= 4096 + 1024);
    assert!(!tree.exists());
}

#[test]
fn test_reclaim_ignores_missing_paths() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("never_created");

    assert_eq!(reclaim_disk_space(&[&missing]).unwrap(), 0);
    // A second pass over an already-cleaned list is a no-op.
    let tree = populated_tree(&root);
    reclaim_disk_space(&[&tree]).unwrap();
    assert_eq!(reclaim_disk_space(&[&tree]).unwrap(), 0);
}

#[test]
fn test_reclaim_survives_concurrent_cells() {
    let root = TempDir::new().unwrap();
    let tree = populated_tree(&root);

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let tree = tree.clone();
            std::thread::spawn(move || reclaim_disk_space(&[&tree]))
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }
    assert!(!tree.exists());
}
