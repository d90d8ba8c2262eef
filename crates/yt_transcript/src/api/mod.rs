use std::future::Future;

use crate::{Transcript, TranscriptError};

pub mod youtube;

pub trait TranscriptApi {
    fn fetch_transcript(
        &self,
        video_id: &str,
    ) -> impl Future<Output = Result<Transcript, TranscriptError>> + Send;
}

impl<T: TranscriptApi + Send + Sync> TranscriptApi for &T {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript, TranscriptError> {
        (**self).fetch_transcript(video_id).await
    }
}
