use super::*;

use btrdex_runtime::BufferedWriter;
use std::{
    fs::{create_dir, create_dir_all, write},
    os::unix::fs::symlink,
    path::PathBuf,
};

fn crawl_to_store(root: &Path) -> (RecordStore, BufferedWriter) {
    let mut store = RecordStore::new();
    let mut status = BufferedWriter::new();
    crawl(root, &mut store, &mut status).expect("crawl");
    (store, status)
}

fn rel_paths(store: &RecordStore, root: &Path) -> Vec<PathBuf> {
    store
        .iter()
        .map(|r| r.path().strip_prefix(root).unwrap().to_path_buf())
        .collect()
}

#[test]
fn to_unix_secs_clamps_negative_values() {
    let cases: &[(i64, u64)] = &[(-1, 0), (i64::MIN, 0), (0, 0), (42, 42)];

    for (input, expected) in cases {
        assert_eq!(
            to_unix_secs(*input),
            *expected,
            "to_unix_secs({}) should be {}",
            input,
            expected
        );
    }
}

#[test]
fn crawl_records_files_and_directories_below_root() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    // root/
    //   a.txt   (2 bytes)
    //   d/
    //     b.txt (0 bytes)
    write(root.join("a.txt"), b"hi").expect("write a.txt");
    create_dir(root.join("d")).expect("create d");
    write(root.join("d").join("b.txt"), b"").expect("write b.txt");

    let (store, _) = crawl_to_store(root);

    let mut paths = rel_paths(&store, root);
    paths.sort();
    assert_eq!(
        paths,
        vec![
            PathBuf::from("a.txt"),
            PathBuf::from("d"),
            PathBuf::from("d/b.txt"),
        ]
    );

    let dirs: Vec<_> = store.iter().filter(|r| r.is_dir()).map(|r| r.name()).collect();
    assert_eq!(dirs, vec!["d"]);

    let a = store.iter().find(|r| r.name() == "a.txt").expect("a.txt");
    assert_eq!(a.size(), 2);
    assert!(a.is_regular());
    assert!(a.object_id() > 0);

    let b = store.iter().find(|r| r.name() == "b.txt").expect("b.txt");
    assert_eq!(b.size(), 0);
    assert_eq!(b.path(), root.join("d").join("b.txt"));
}

#[test]
fn crawl_of_empty_root_yields_nothing() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let (store, status) = crawl_to_store(tmp.path());

    assert!(store.is_empty());
    assert!(status.lines().is_empty());
}

#[test]
fn crawl_visits_subtree_before_later_siblings() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    create_dir_all(root.join("p/q/r")).expect("create nested dirs");
    write(root.join("p/q/r/leaf"), b"x").expect("write leaf");
    write(root.join("p/q/mid"), b"x").expect("write mid");
    create_dir(root.join("s")).expect("create s");
    write(root.join("s/other"), b"x").expect("write other");
    write(root.join("top"), b"x").expect("write top");

    let (store, _) = crawl_to_store(root);
    let paths = rel_paths(&store, root);
    assert_eq!(paths.len(), 8);

    // Every directory's descendants form one contiguous run right after it.
    for (i, dir) in paths.iter().enumerate() {
        if !store.as_slice()[i].is_dir() {
            continue;
        }
        let descendants = paths.iter().filter(|p| p.starts_with(dir) && *p != dir).count();
        for offset in 1..=descendants {
            assert!(
                paths[i + offset].starts_with(dir),
                "{:?} should directly follow {:?} in {:?}",
                paths[i + offset],
                dir,
                paths
            );
        }
    }
}

#[test]
fn crawl_records_symlinks_without_following_them() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    create_dir(root.join("real")).expect("create real");
    write(root.join("real/big.bin"), vec![0u8; 10_000]).expect("write big.bin");
    symlink(root.join("real/big.bin"), root.join("file_link")).expect("file symlink");
    symlink(root.join("real"), root.join("dir_link")).expect("dir symlink");

    let (store, _) = crawl_to_store(root);

    let file_link = store.iter().find(|r| r.name() == "file_link").expect("file_link");
    assert!(file_link.is_symlink());
    assert_ne!(file_link.size(), 10_000, "size must be the link's own");
    assert_eq!(
        file_link.size(),
        root.join("real/big.bin").as_os_str().len() as u64
    );

    let dir_link = store.iter().find(|r| r.name() == "dir_link").expect("dir_link");
    assert!(dir_link.is_symlink());
    assert!(!dir_link.is_dir());

    // big.bin is reached once, through real/, never through dir_link/.
    let big_count = store.iter().filter(|r| r.name() == "big.bin").count();
    assert_eq!(big_count, 1);
}

#[test]
fn crawl_keeps_one_record_per_hard_link() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    write(root.join("orig"), b"data").expect("write orig");
    fs::hard_link(root.join("orig"), root.join("alias")).expect("hard link");

    let (store, _) = crawl_to_store(root);
    assert_eq!(store.len(), 2);

    let ids: Vec<_> = store.iter().map(|r| r.object_id()).collect();
    assert_eq!(ids[0], ids[1], "both names share the inode");
}

#[test]
fn crawl_reports_progress_every_interval() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    let total = PROGRESS_INTERVAL * 2 + 17;
    for i in 0..total {
        write(root.join(format!("f{i:05}")), b"").expect("write file");
    }

    let (store, status) = crawl_to_store(root);
    assert_eq!(store.len(), total);
    assert_eq!(
        status.lines(),
        &[
            format!("Processed {} files...", PROGRESS_INTERVAL),
            format!("Processed {} files...", PROGRESS_INTERVAL * 2),
        ]
    );
}

#[test]
fn crawl_fails_when_root_cannot_be_listed() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let mut store = RecordStore::new();
    let mut status = BufferedWriter::new();

    let missing = tmp.path().join("missing");
    assert!(crawl(&missing, &mut store, &mut status).is_err());

    let file = tmp.path().join("plain");
    write(&file, b"x").expect("write plain");
    assert!(crawl(&file, &mut store, &mut status).is_err());

    assert!(store.is_empty());
}

#[test]
fn crawl_skips_unreadable_subtree_and_keeps_the_rest() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    write(root.join("kept"), b"x").expect("write kept");
    create_dir(root.join("locked")).expect("create locked");
    write(root.join("locked/hidden"), b"x").expect("write hidden");
    fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o000))
        .expect("chmod locked");

    // Privileged users can list the directory anyway; nothing to check then.
    let still_readable = read_dir(root.join("locked")).is_ok();

    let (store, _) = crawl_to_store(root);

    fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o755))
        .expect("restore permissions");

    if still_readable {
        return;
    }

    let mut names: Vec<_> = store.iter().map(|r| r.name()).collect();
    names.sort();
    assert_eq!(names, vec!["kept", "locked"]);
}
