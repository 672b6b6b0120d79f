//! Append-only perception frame recorder.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use touchless_common::error::{TouchlessError, TouchlessResult};
use touchless_landmark_model::{FrameStreamHeader, PerceptionFrame};

/// Current recorded stream schema.
pub const FRAME_SCHEMA_VERSION: &str = "1.0";

const FLUSH_EVERY: u64 = 300;

/// Writes frames to a JSONL file, header first.
pub struct FrameWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    frames_written: u64,
}

impl FrameWriter {
    /// Create (or truncate) `path` and write the header line.
    pub fn create(path: &Path, header: &FrameStreamHeader) -> TouchlessResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        let mut writer = BufWriter::new(file);

        let header_json = serde_json::to_string(header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| TouchlessError::source(format!("Failed to write header: {e}")))?;

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            frames_written: 0,
        })
    }

    pub fn header(epoch_wall: &str, camera_width: u32, camera_height: u32) -> FrameStreamHeader {
        FrameStreamHeader {
            schema_version: FRAME_SCHEMA_VERSION.to_string(),
            epoch_wall: epoch_wall.to_string(),
            camera_width,
            camera_height,
        }
    }

    pub fn write_frame(&mut self, frame: &PerceptionFrame) -> TouchlessResult<()> {
        let json = serde_json::to_string(frame)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| TouchlessError::source(format!("Failed to write frame: {e}")))?;
        self.frames_written += 1;

        if self.frames_written % FLUSH_EVERY == 0 {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> TouchlessResult<()> {
        self.writer
            .flush()
            .map_err(|e| TouchlessError::source(format!("Failed to flush frames: {e}")))
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FrameWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use touchless_landmark_model::{HandLabel, HandRecord, HandsFrame, Landmark};

    #[test]
    fn test_frame_writer_output_parses_back() {
        let dir = std::env::temp_dir().join("touchless_test_writer");
        let _ = std::fs::remove_dir_all(&dir);

        let path = dir.join("session").join("frames.jsonl");
        let hand = HandRecord::new(HandLabel::Right, vec![Landmark::new(10, 20); 21]).unwrap();
        let frames = vec![
            PerceptionFrame::hands(HandsFrame::new().with(hand)).at(0),
            PerceptionFrame::hands(HandsFrame::new()).at(33_000_000).sized(640, 480),
        ];

        {
            let header = FrameWriter::header("2026-01-01T00:00:00+00:00", 640, 480);
            let mut writer = FrameWriter::create(&path, &header).unwrap();
            for frame in &frames {
                writer.write_frame(frame).unwrap();
            }
            assert_eq!(writer.frames_written(), 2);
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        let header: FrameStreamHeader =
            serde_json::from_str(lines[0].trim_start_matches("# ")).unwrap();
        assert_eq!(header.schema_version, FRAME_SCHEMA_VERSION);
        assert_eq!(touchless_landmark_model::parse_frames(&content).unwrap(), frames);

        std::fs::remove_dir_all(&dir).ok();
    }
}
