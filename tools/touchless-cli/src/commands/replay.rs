//! Print the action stream a recorded session produces.

use std::io::Write;
use std::path::PathBuf;

use touchless_common::clock::SessionClock;
use touchless_common::config::AppConfig;
use touchless_gesture_core::{FaceGestureEngine, GestureSource, HandGestureEngine};
use touchless_landmark_source::{JsonlSource, LandmarkSource};

use crate::GestureMode;

/// Frame rate assumed for frames recorded without timestamps.
const FALLBACK_FPS: f64 = 30.0;

pub fn run(config: &AppConfig, path: PathBuf, mode: GestureMode) -> anyhow::Result<()> {
    let mut source = JsonlSource::open(&path)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let frames = match mode {
        GestureMode::Hand => {
            replay(HandGestureEngine::new(&config.hand), &mut source, &mut out)?
        }
        GestureMode::Face => {
            replay(FaceGestureEngine::new(&config.face), &mut source, &mut out)?
        }
    };

    tracing::info!(frames, path = %path.display(), "Replay finished");
    Ok(())
}

/// Write one JSON line per frame: index, decision time, and actions.
fn replay<G: GestureSource>(
    mut engine: G,
    source: &mut dyn LandmarkSource,
    out: &mut dyn Write,
) -> anyhow::Result<u64> {
    let mut index = 0u64;
    while let Some(frame) = source.poll()? {
        let now = frame
            .timestamp_secs()
            .unwrap_or(index as f64 / FALLBACK_FPS);
        let actions = engine.actions_at(&frame.perception, now);
        let t_ns = frame
            .timestamp_ns
            .unwrap_or_else(|| SessionClock::secs_to_ns(now));

        let line = serde_json::json!({
            "frame": index,
            "t": t_ns,
            "actions": actions,
        });
        writeln!(out, "{line}")?;
        index += 1;
    }
    out.flush()?;
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use touchless_common::config::HandGestureConfig;

    #[test]
    fn test_replay_writes_a_line_per_frame() {
        let input = "# header\n{\"source\":\"hands\",\"hands\":[]}\n{\"t\":5000000,\"source\":\"hands\",\"hands\":[]}\n";
        let mut source = JsonlSource::new(Cursor::new(input), "mem");
        let mut out = Vec::new();

        let frames = replay(
            HandGestureEngine::new(&HandGestureConfig::default()),
            &mut source,
            &mut out,
        )
        .unwrap();
        assert_eq!(frames, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["frame"], 0);
        assert_eq!(lines[1]["t"], 5_000_000);
        assert_eq!(lines[1]["actions"], serde_json::json!([]));
    }
}
