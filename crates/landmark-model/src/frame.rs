//! Perception frames: one landmark snapshot per camera frame.
//!
//! Streams are stored as JSONL, one frame per line. Lines starting with `#`
//! carry a stream header and are skipped by the parser.

use serde::{Deserialize, Serialize};

use crate::landmark::{FaceRecord, HandsFrame};

/// Monotonic timestamp in nanoseconds since session start.
pub type TimestampNs = u64;

/// What the tracker saw in one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Perception {
    /// Hand tracker output. Empty when no hands were detected.
    Hands { hands: HandsFrame },

    /// Face mesh output. `None` when no face was detected.
    Face {
        #[serde(default)]
        face: Option<FaceRecord>,
    },
}

/// A perception snapshot with its camera frame geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerceptionFrame {
    /// Capture time, when the producer recorded one.
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ns: Option<TimestampNs>,

    /// Camera frame width in pixels, when the producer declared it.
    #[serde(rename = "w", default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Camera frame height in pixels, when the producer declared it.
    #[serde(rename = "h", default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(flatten)]
    pub perception: Perception,
}

impl PerceptionFrame {
    pub fn hands(hands: HandsFrame) -> Self {
        Self {
            timestamp_ns: None,
            width: None,
            height: None,
            perception: Perception::Hands { hands },
        }
    }

    pub fn face(face: Option<FaceRecord>) -> Self {
        Self {
            timestamp_ns: None,
            width: None,
            height: None,
            perception: Perception::Face { face },
        }
    }

    pub fn at(mut self, timestamp_ns: TimestampNs) -> Self {
        self.timestamp_ns = Some(timestamp_ns);
        self
    }

    pub fn sized(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Frame size, falling back to `default` for undeclared dimensions.
    pub fn size_or(&self, default: (u32, u32)) -> (u32, u32) {
        (
            self.width.unwrap_or(default.0),
            self.height.unwrap_or(default.1),
        )
    }

    /// Timestamp as fractional seconds, if recorded.
    pub fn timestamp_secs(&self) -> Option<f64> {
        self.timestamp_ns.map(|t| t as f64 / 1_000_000_000.0)
    }
}

/// Header written as the first (`#`-prefixed) line of a recorded stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameStreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time at session start (RFC 3339).
    pub epoch_wall: String,

    /// Camera resolution the stream was captured at.
    pub camera_width: u32,
    pub camera_height: u32,
}

/// Parse a single JSONL line. Returns `Ok(None)` for blank and header lines.
pub fn parse_frame_line(line: &str) -> Result<Option<PerceptionFrame>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// Parse frames from JSONL content (one JSON object per line).
pub fn parse_frames(jsonl: &str) -> Result<Vec<PerceptionFrame>, serde_json::Error> {
    jsonl
        .lines()
        .filter_map(|line| parse_frame_line(line).transpose())
        .collect()
}

/// Serialize frames to JSONL format.
pub fn serialize_frames(frames: &[PerceptionFrame]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{HandLabel, HandRecord, Landmark};

    fn flat_hand(label: HandLabel) -> HandRecord {
        HandRecord::new(label, vec![Landmark::new(100, 100); 21]).unwrap()
    }

    #[test]
    fn test_hands_frame_json_shape() {
        let frame = PerceptionFrame::hands(HandsFrame::new().with(flat_hand(HandLabel::Right)))
            .at(33_000_000)
            .sized(640, 480);
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"t\":33000000"));
        assert!(json.contains("\"source\":\"hands\""));
        assert!(json.contains("\"label\":\"Right\""));
        assert!(json.contains("\"w\":640"));
    }

    #[test]
    fn test_face_frame_without_face() {
        let parsed = parse_frame_line(r#"{"source":"face"}"#).unwrap().unwrap();
        assert_eq!(parsed.perception, Perception::Face { face: None });
        assert_eq!(parsed.timestamp_ns, None);
        assert_eq!(parsed.size_or((640, 480)), (640, 480));
    }

    #[test]
    fn test_parse_frames_skips_header_and_blank_lines() {
        let jsonl = "# {\"schema_version\":\"1.0\"}\n\n{\"t\":0,\"source\":\"hands\",\"hands\":[]}\n";
        let frames = parse_frames(jsonl).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].timestamp_secs(), Some(0.0));
        assert_eq!(
            frames[0].perception,
            Perception::Hands {
                hands: HandsFrame::new()
            }
        );
    }

    #[test]
    fn test_jsonl_roundtrip() {
        let frames = vec![
            PerceptionFrame::hands(HandsFrame::new().with(flat_hand(HandLabel::Left))).at(0),
            PerceptionFrame::hands(HandsFrame::new()).at(16_000_000),
            PerceptionFrame::face(None).sized(1280, 720),
        ];
        let jsonl = serialize_frames(&frames).unwrap();
        assert_eq!(parse_frames(&jsonl).unwrap(), frames);
    }

    #[test]
    fn test_malformed_hand_in_stream_is_an_error() {
        let jsonl = r#"{"source":"hands","hands":[{"label":"Right","lm":[[0,0]]}]}"#;
        assert!(parse_frames(jsonl).is_err());
    }
}
