use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// One timed caption entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    /// Offset from the start of the video, in seconds
    pub start: f64,
    /// Seconds
    pub duration: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub video_id: String,
    pub language_code: String,
    pub is_generated: bool,
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Joins every segment's text with a single space, in the order the segments
    /// were returned. Timing information is not carried over.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).join(" ")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Too many requests: YouTube is asking for a captcha")]
    TooManyRequests,
    #[error("The video {video_id} is unavailable: {reason}")]
    VideoUnavailable { video_id: String, reason: String },
    #[error("Subtitles are disabled for video {video_id}")]
    TranscriptsDisabled { video_id: String },
    #[error(
        "No transcript found for video {video_id} in languages {requested:?}, available: {available:?}"
    )]
    NoTranscriptFound {
        video_id: String,
        requested: Vec<String>,
        available: Vec<String>,
    },
    #[error("Parse error: {0}")]
    ParseError(&'static str),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TranscriptError {
    /// Whether YouTube reports that the video simply has no usable transcript,
    /// as opposed to the request itself failing.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            TranscriptError::TranscriptsDisabled { .. } | TranscriptError::NoTranscriptFound { .. }
        )
    }
}
