//! Landmark source implementations.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use touchless_common::error::{TouchlessError, TouchlessResult};
use touchless_landmark_model::{parse_frame_line, PerceptionFrame};

use crate::LandmarkSource;

/// Reads JSONL perception frames from any buffered reader.
///
/// Header (`#`) and blank lines are skipped. A malformed line is an error
/// naming its line number; the source can keep polling after it.
pub struct JsonlSource<R: BufRead> {
    reader: R,
    name: String,
    line: String,
    line_number: u64,
    frames_read: u64,
}

impl<R: BufRead> JsonlSource<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
            line: String::new(),
            line_number: 0,
            frames_read: 0,
        }
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }
}

impl JsonlSource<BufReader<File>> {
    /// Open a recorded stream.
    pub fn open(path: &Path) -> TouchlessResult<Self> {
        if !path.exists() {
            return Err(TouchlessError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        tracing::debug!(path = %path.display(), "Opened landmark stream");
        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }
}

impl<R: BufRead> LandmarkSource for JsonlSource<R> {
    fn poll(&mut self) -> TouchlessResult<Option<PerceptionFrame>> {
        loop {
            self.line.clear();
            let read = self.reader.read_line(&mut self.line).map_err(|e| {
                TouchlessError::source(format!("Failed to read from {}: {e}", self.name))
            })?;
            if read == 0 {
                tracing::debug!(
                    source = %self.name,
                    frames = self.frames_read,
                    "End of landmark stream"
                );
                return Ok(None);
            }
            self.line_number += 1;

            match parse_frame_line(&self.line) {
                Ok(Some(frame)) => {
                    self.frames_read += 1;
                    return Ok(Some(frame));
                }
                Ok(None) => continue,
                Err(e) => {
                    return Err(TouchlessError::landmark(format!(
                        "{} line {}: {e}",
                        self.name, self.line_number
                    )));
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Serves a fixed list of frames, then ends.
pub struct StubSource {
    frames: VecDeque<PerceptionFrame>,
}

impl StubSource {
    pub fn new(frames: Vec<PerceptionFrame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkSource for StubSource {
    fn poll(&mut self) -> TouchlessResult<Option<PerceptionFrame>> {
        Ok(self.frames.pop_front())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_jsonl_skips_header_and_blank_lines() {
        let input = "# {\"schema_version\":\"1.0\"}\n\n{\"source\":\"face\"}\n";
        let mut source = JsonlSource::new(Cursor::new(input), "mem");
        let frame = source.poll().unwrap().unwrap();
        assert_eq!(frame, PerceptionFrame::face(None));
        assert!(source.poll().unwrap().is_none());
        assert_eq!(source.frames_read(), 1);
    }

    #[test]
    fn test_jsonl_reports_line_number() {
        let input = "{\"source\":\"face\"}\n{\"source\":\"elbow\"}\n";
        let mut source = JsonlSource::new(Cursor::new(input), "mem");
        source.poll().unwrap();
        let err = source.poll().unwrap_err();
        assert!(matches!(err, TouchlessError::Landmark { .. }));
        assert!(err.to_string().contains("mem line 2"));
    }

    #[test]
    fn test_open_missing_file() {
        let err = JsonlSource::open(Path::new("/nonexistent/touchless.jsonl"))
            .err()
            .unwrap();
        assert!(matches!(err, TouchlessError::FileNotFound { .. }));
    }

    #[test]
    fn test_stub_drains_in_order() {
        let mut source = StubSource::new(vec![
            PerceptionFrame::face(None).at(1),
            PerceptionFrame::face(None).at(2),
        ]);
        assert_eq!(source.poll().unwrap().unwrap().timestamp_ns, Some(1));
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.poll().unwrap().unwrap().timestamp_ns, Some(2));
        assert!(source.poll().unwrap().is_none());
    }
}
