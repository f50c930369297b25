use super::*;

#[tokio::test]
async fn file_uri_is_copied() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src.mp4");
    std::fs::write(&src, b"not really a video").unwrap();
    let dst = dir.path().join("dst.mp4");

    let fetcher = HttpFetcher::new().unwrap();
    fetcher
        .fetch(&format!("file://{}", src.display()), &dst)
        .await
        .unwrap();

    assert_eq!(std::fs::read(&dst).unwrap(), b"not really a video");
}

#[tokio::test]
async fn missing_file_uri_is_a_fetch_error() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = HttpFetcher::new().unwrap();
    let err = fetcher
        .fetch("file:///nonexistent/vidtrim/source.mp4", &dir.path().join("x.mp4"))
        .await
        .unwrap_err();
    assert!(matches!(err, TrimError::MediaFetch(_)));
}

#[tokio::test]
async fn unreachable_host_is_a_fetch_error_without_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let dst = dir.path().join("x.mp4");
    let fetcher = HttpFetcher::new().unwrap();
    // Port 9 on loopback is not expected to serve HTTP.
    let err = fetcher
        .fetch("http://127.0.0.1:9/video.mp4", &dst)
        .await
        .unwrap_err();
    assert!(matches!(err, TrimError::MediaFetch(_)));
    assert!(!dst.exists());
}
