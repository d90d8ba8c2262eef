use std::sync::{Arc, Mutex};
use yt_notes::{Transcript, TranscriptApi, TranscriptError, TranscriptSegment};

#[derive(Clone, Copy, Debug)]
pub enum Failure {
    Disabled,
    NotFound,
    RateLimited,
    Http(u16),
}

#[derive(Clone)]
pub struct MockTranscriptApi {
    pub segments: Vec<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<Failure>,
}

impl MockTranscriptApi {
    pub fn new(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.to_string()).collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            segments: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(failure),
        }
    }
}

impl TranscriptApi for MockTranscriptApi {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript, TranscriptError> {
        self.calls.lock().unwrap().push(video_id.to_string());

        match self.fail_with {
            Some(Failure::Disabled) => Err(TranscriptError::TranscriptsDisabled {
                video_id: video_id.to_string(),
            }),
            Some(Failure::NotFound) => Err(TranscriptError::NoTranscriptFound {
                video_id: video_id.to_string(),
                requested: vec!["en".into()],
                available: vec!["de".into()],
            }),
            Some(Failure::RateLimited) => Err(TranscriptError::TooManyRequests),
            Some(Failure::Http(status)) => Err(TranscriptError::Api {
                status,
                message: "Service Unavailable".into(),
            }),
            None => Ok(Transcript {
                video_id: video_id.to_string(),
                language_code: "en".into(),
                is_generated: false,
                segments: self
                    .segments
                    .iter()
                    .enumerate()
                    .map(|(i, text)| TranscriptSegment {
                        text: text.clone(),
                        start: i as f64 * 2.0,
                        duration: 2.0,
                    })
                    .collect(),
            }),
        }
    }
}
