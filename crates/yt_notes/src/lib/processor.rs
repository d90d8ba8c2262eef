use crate::{NotesPage, Summarizer, TranscriptApi, VideoId};

pub mod builder;

/// Turns one submitted YouTube URL into a rendered [`NotesPage`].
///
/// Every call starts from scratch; nothing is kept between interactions.
#[derive(Debug)]
pub struct NotesProcessor<T, S>
where
    T: TranscriptApi + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    transcript_api: T,
    summarizer: S,
    prompt: String,
}

impl<T, S> NotesProcessor<T, S>
where
    T: TranscriptApi + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    pub const DEFAULT_PROMPT: &str = "You are a YouTube video summarizer. You will summarize the transcript text
and provide the important points in under 250 words. Please provide the summary of the text given here:  ";

    pub fn new(transcript_api: T, summarizer: S) -> Self {
        NotesProcessor {
            transcript_api,
            summarizer,
            prompt: Self::DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// What the page shows as soon as a URL is typed in: the video thumbnail, or
    /// a warning when no video id can be found in the URL
    pub fn preview(&self, url: &str) -> NotesPage {
        let mut page = NotesPage::new(url);

        if url.is_empty() {
            return page;
        }

        match VideoId::from_url(url) {
            Ok(video_id) => page.thumbnail_url = Some(video_id.thumbnail_url()),
            Err(_) => page.warn("Invalid YouTube URL entered."),
        }

        page
    }

    /// Fetches the transcript of the video behind `url` and joins its segments.
    ///
    /// Failures never escape: they are reported on `page` and `None` is returned
    /// so the caller can skip summarization.
    #[tracing::instrument(skip(self, page))]
    pub async fn fetch_transcript_text(&self, url: &str, page: &mut NotesPage) -> Option<String> {
        let video_id = match VideoId::from_url(url) {
            Ok(video_id) => video_id,
            Err(e) => {
                page.error(format!("Unexpected error: {e}"));
                return None;
            }
        };

        match self.transcript_api.fetch_transcript(&video_id).await {
            Ok(transcript) => {
                tracing::info!(
                    segments = transcript.segments.len(),
                    language = %transcript.language_code,
                    "Fetched transcript"
                );
                Some(transcript.text())
            }
            Err(e) if e.is_unavailable() => {
                tracing::warn!(error = %e, "Transcript not available");
                page.error("Transcript not available for this video.");
                None
            }
            Err(e) => {
                tracing::error!(error = ?e, "Failed to fetch transcript");
                page.error(format!("Unexpected error: {e}"));
                None
            }
        }
    }

    /// Sends the prompt followed by the transcript to the summarizer and returns
    /// its reply unmodified
    #[tracing::instrument(skip_all, fields(model = self.summarizer.model(), transcript_len = transcript_text.len()))]
    pub async fn generate_summary(&self, transcript_text: &str) -> anyhow::Result<String> {
        let content = format!("{}{}", self.prompt, transcript_text);

        let summary_resp = self
            .summarizer
            .summarize(&content)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to summarize transcript: {e:?}"))?;

        Ok(summary_resp.summary)
    }

    /// Runs the whole interaction for a "Get Detailed Notes" request.
    ///
    /// # Returns
    /// * `Ok(NotesPage)` holding the notes, or the notices explaining why there
    ///   are none
    /// * `Err(_)` only when the summarizer fails
    #[tracing::instrument(skip(self))]
    pub async fn generate(&self, url: &str) -> anyhow::Result<NotesPage> {
        let mut page = self.preview(url);

        let transcript_text = self
            .fetch_transcript_text(url, &mut page)
            .await
            .filter(|text| !text.is_empty());

        let Some(transcript_text) = transcript_text else {
            page.warn("Cannot generate summary without transcript.");
            return Ok(page);
        };

        page.notes = Some(self.generate_summary(&transcript_text).await?);

        Ok(page)
    }
}
