use super::*;

#[test]
fn unique_paths_differ_and_live_under_root() {
    let cache = CacheDir::new("/tmp/vidtrim-test");
    let a = cache.unique_path("mp4");
    let b = cache.unique_path("mp4");
    assert_ne!(a, b);
    assert!(a.starts_with("/tmp/vidtrim-test"));
    assert_eq!(a.extension().and_then(|e| e.to_str()), Some("mp4"));
}

#[tokio::test]
async fn ensure_creates_nested_root() {
    let dir = tempfile::tempdir().unwrap();
    let cache = CacheDir::new(dir.path().join("a").join("b"));
    cache.ensure().await.unwrap();
    assert!(cache.root().is_dir());
}

#[tokio::test]
async fn discard_removes_artifacts_under_root_only() {
    let dir = tempfile::tempdir().unwrap();
    let cache = CacheDir::new(dir.path().join("cache"));
    cache.ensure().await.unwrap();

    let artifact = cache.unique_path("mp4");
    std::fs::write(&artifact, b"x").unwrap();
    cache.discard(&artifact).await;
    assert!(!artifact.exists());

    // Already gone: no error.
    cache.discard(&artifact).await;

    let outside = dir.path().join("source.mp4");
    std::fs::write(&outside, b"x").unwrap();
    cache.discard(&outside).await;
    assert!(outside.is_file());
}
