use super::*;

#[test]
fn engine_config_defaults_to_path_lookup() {
    let cfg: EngineConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, EngineConfig::default());
    assert_eq!(cfg.program(Tool::Ffprobe), &PathBuf::from("ffprobe"));
}

#[test]
fn outcome_helpers_set_return_code() {
    assert!(ExecOutcome::success("ok").return_code.is_success());
    assert!(!ExecOutcome::failure("bad").return_code.is_success());
    assert!(!ReturnCode::Failure(None).is_success());
}

#[test]
fn invocation_display_joins_args() {
    let inv = Invocation::new(Tool::Ffmpeg, vec!["-i".into(), "a.mp4".into()]);
    assert_eq!(inv.display_args(), "-i a.mp4");
}

#[tokio::test]
async fn missing_binary_is_a_spawn_error_not_a_return_code() {
    let engine = FfmpegEngine::new(EngineConfig {
        ffmpeg_bin: PathBuf::from("/nonexistent/vidtrim-ffmpeg"),
        ffprobe_bin: PathBuf::from("/nonexistent/vidtrim-ffprobe"),
    });

    let err = engine
        .execute(&Invocation::new(Tool::Ffprobe, vec!["-version".into()]))
        .await
        .unwrap_err();
    assert!(matches!(err, TrimError::Other(_)));
    assert!(!engine.is_available().await);
}
