use super::*;

fn entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[test]
fn run_dirs_are_unique_and_prefixed() {
    let work = tempfile::tempdir().unwrap();
    let a = FrameStore::create(Some(work.path())).unwrap();
    let b = FrameStore::create(Some(work.path())).unwrap();

    assert_ne!(a.dir(), b.dir());
    assert!(a.dir().starts_with(work.path()));
    let name = a.dir().file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("diff2gif-"), "{name}");
}

#[test]
fn clean_removes_frames_and_is_idempotent() {
    let work = tempfile::tempdir().unwrap();
    let mut store = FrameStore::create(Some(work.path())).unwrap();
    for i in 0..3 {
        let p = store.dir().join(format!("t_{i:05}.png"));
        std::fs::write(&p, b"x").unwrap();
        store.record(p);
    }
    assert_eq!(store.frames().len(), 3);

    store.clean();
    store.clean();
    assert!(store.is_clean());
    assert!(store.frames().is_empty());
    assert_eq!(entries(work.path()), 0);
}

#[test]
fn clean_tolerates_frames_already_gone() {
    let work = tempfile::tempdir().unwrap();
    let mut store = FrameStore::create(Some(work.path())).unwrap();
    let p = store.dir().join("t_00000.png");
    std::fs::write(&p, b"x").unwrap();
    store.record(p.clone());
    std::fs::remove_file(&p).unwrap();

    store.clean();
    assert_eq!(entries(work.path()), 0);
}

#[test]
fn drop_cleans_up() {
    let work = tempfile::tempdir().unwrap();
    {
        let mut store = FrameStore::create(Some(work.path())).unwrap();
        let p = store.dir().join("t_00000.png");
        std::fs::write(&p, b"x").unwrap();
        store.record(p);
    }
    assert_eq!(entries(work.path()), 0);
}

#[test]
fn missing_work_dir_is_created() {
    let work = tempfile::tempdir().unwrap();
    let nested = work.path().join("a").join("b");
    let store = FrameStore::create(Some(&nested)).unwrap();
    assert!(store.dir().starts_with(&nested));
}
