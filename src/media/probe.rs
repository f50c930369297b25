use crate::foundation::error::{TrimError, TrimResult};
use crate::media::engine::{ExecOutcome, Invocation, MediaEngine, Tool};

/// Intrinsic properties of the first video stream.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StreamProbe {
    /// Width in pixels, rounded up.
    pub width: u32,
    /// Height in pixels, rounded up.
    pub height: u32,
    /// Stream duration in seconds, unrounded.
    pub duration: f64,
}

/// `ffprobe` arguments printing `WIDTHxHEIGHTxDURATION` for the first video stream.
pub fn stream_probe_invocation(source: &str) -> Invocation {
    Invocation::new(
        Tool::Ffprobe,
        vec![
            "-v".into(),
            "error".into(),
            "-select_streams".into(),
            "v:0".into(),
            "-show_entries".into(),
            "stream=width,height,duration".into(),
            "-of".into(),
            "csv=s=x:p=0".into(),
            source.to_owned(),
        ],
    )
}

/// `ffprobe` arguments printing the container duration as a bare number.
pub fn duration_probe_invocation(source: &str) -> Invocation {
    Invocation::new(
        Tool::Ffprobe,
        vec![
            "-v".into(),
            "error".into(),
            "-show_entries".into(),
            "format=duration".into(),
            "-of".into(),
            "default=nw=1:nk=1".into(),
            source.to_owned(),
        ],
    )
}

/// Parse `WIDTHxHEIGHTxDURATION` output.
pub fn parse_stream_probe(output: &str) -> TrimResult<StreamProbe> {
    let line = first_line(output)
        .ok_or_else(|| TrimError::media_probe("probe produced no output"))?;

    let mut parts = line.split('x');
    let (Some(w), Some(h), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(TrimError::media_probe(format!(
            "unexpected stream probe output '{line}'"
        )));
    };

    Ok(StreamProbe {
        width: parse_dimension(w, "width")?,
        height: parse_dimension(h, "height")?,
        duration: parse_seconds(d)?,
    })
}

/// Parse a bare duration number.
pub fn parse_duration_probe(output: &str) -> TrimResult<f64> {
    let line = first_line(output)
        .ok_or_else(|| TrimError::media_probe("probe produced no output"))?;
    parse_seconds(line)
}

/// Probe width, height and duration of `source`.
#[tracing::instrument(skip(engine))]
pub async fn probe_stream<E: MediaEngine>(engine: &E, source: &str) -> TrimResult<StreamProbe> {
    let outcome = engine
        .execute(&stream_probe_invocation(source))
        .await
        .map_err(|e| TrimError::media_probe(e.to_string()))?;
    let outcome = require_success(outcome, source)?;
    parse_stream_probe(&outcome.output)
}

/// Probe the container duration of `source`.
#[tracing::instrument(skip(engine))]
pub async fn probe_duration<E: MediaEngine>(engine: &E, source: &str) -> TrimResult<f64> {
    let outcome = engine
        .execute(&duration_probe_invocation(source))
        .await
        .map_err(|e| TrimError::media_probe(e.to_string()))?;
    let outcome = require_success(outcome, source)?;
    parse_duration_probe(&outcome.output)
}

fn require_success(outcome: ExecOutcome, source: &str) -> TrimResult<ExecOutcome> {
    if !outcome.return_code.is_success() {
        return Err(TrimError::media_probe(format!(
            "ffprobe failed for '{source}': {}",
            outcome.log.trim()
        )));
    }
    Ok(outcome)
}

fn first_line(output: &str) -> Option<&str> {
    output.lines().map(str::trim).find(|l| !l.is_empty())
}

fn parse_dimension(raw: &str, what: &str) -> TrimResult<u32> {
    let v = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| TrimError::media_probe(format!("invalid {what} '{raw}'")))?;
    if !v.is_finite() || v < 0.0 || v > f64::from(u32::MAX) {
        return Err(TrimError::media_probe(format!("{what} out of range: {v}")));
    }
    Ok(v.ceil() as u32)
}

fn parse_seconds(raw: &str) -> TrimResult<f64> {
    let v = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| TrimError::media_probe(format!("invalid duration '{raw}'")))?;
    if !v.is_finite() || v < 0.0 {
        return Err(TrimError::media_probe(format!("duration out of range: {v}")));
    }
    Ok(v)
}

#[cfg(test)]
#[path = "../../tests/unit/media/probe.rs"]
mod tests;
