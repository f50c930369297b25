use super::*;

#[test]
fn partial_json_fills_defaults() {
    let cfg: EditorSessionConfig =
        serde_json::from_str(r#"{ "source_uri": "a.mp4", "max_duration_seconds": 30 }"#).unwrap();
    assert_eq!(cfg.source_uri, "a.mp4");
    assert_eq!(cfg.max_duration_seconds, Some(30));
    assert!(!cfg.is_local_source);
    assert!(!cfg.allow_snapshot);
    assert_eq!(cfg.max_output_size, None);
}

#[test]
fn validate_rejects_empty_source_and_zero_caps() {
    assert!(EditorSessionConfig::new("a.mp4").validate().is_ok());
    assert!(matches!(
        EditorSessionConfig::new("  ").validate(),
        Err(TrimError::Validation(_))
    ));

    let err = EditorSessionConfig::new("a.mp4")
        .with_max_output_size(Some(0))
        .validate()
        .unwrap_err();
    assert!(err.to_string().contains("max_output_size"));

    let err = EditorSessionConfig::new("a.mp4")
        .with_snapshot(true, Some(0))
        .validate()
        .unwrap_err();
    assert!(err.to_string().contains("snapshot_max_size"));
}

#[test]
fn snapshot_size_falls_back_to_output_size_then_default() {
    let cfg = EditorSessionConfig::new("a.mp4");
    assert_eq!(cfg.effective_snapshot_max_size(), DEFAULT_SNAPSHOT_MAX_SIZE);

    let cfg = cfg.with_max_output_size(Some(720));
    assert_eq!(cfg.effective_snapshot_max_size(), 720);

    let cfg = cfg.with_snapshot(true, Some(480));
    assert_eq!(cfg.effective_snapshot_max_size(), 480);
}

#[test]
fn json_file_is_read_and_validated() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.json");
    std::fs::write(
        &good,
        r#"{ "source_uri": "https://cdn.example/v.mp4", "allow_snapshot": true }"#,
    )
    .unwrap();
    let cfg = EditorSessionConfig::from_json_file(&good).unwrap();
    assert!(cfg.allow_snapshot);

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, r#"{ "source_uri": "" }"#).unwrap();
    assert!(matches!(
        EditorSessionConfig::from_json_file(&bad),
        Err(TrimError::Validation(_))
    ));

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{ not json").unwrap();
    let err = EditorSessionConfig::from_json_file(&broken).unwrap_err();
    assert!(err.to_string().contains("invalid session config"));

    assert!(EditorSessionConfig::from_json_file(&dir.path().join("missing.json")).is_err());
}
