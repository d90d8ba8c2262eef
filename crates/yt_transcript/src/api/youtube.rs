use reqwest::{header, Client};

use crate::{
    player::{select_track, CaptionTrack, WatchPage},
    timedtext::parse_timedtext,
    Transcript, TranscriptApi, TranscriptError, TranscriptSegment,
};

/// Fetches transcripts by scraping the public watch page and its timedtext track
#[derive(Debug, Clone)]
pub struct YouTubeTranscriptApi {
    client: Client,
    languages: Vec<String>,
    watch_url: String,
}

impl Default for YouTubeTranscriptApi {
    fn default() -> Self {
        Self::new()
    }
}

impl YouTubeTranscriptApi {
    const WATCH_URL: &str = "https://www.youtube.com/watch";

    pub fn new() -> Self {
        Self {
            client: Client::new(),
            languages: vec!["en".into()],
            watch_url: Self::WATCH_URL.into(),
        }
    }

    /// Language codes to look for, in order of preference
    pub fn with_languages<I, L>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_watch_url(mut self, url: impl Into<String>) -> Self {
        self.watch_url = url.into();
        self
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    async fn get_text(&self, url: &str, cookie: Option<String>) -> Result<String, TranscriptError> {
        let mut request = self
            .client
            .get(url)
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9");

        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let resp = request
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        let status = resp.status();
        if !status.is_success() {
            // the body is a full HTML page, keep it out of user-facing messages
            tracing::warn!(status = status.as_u16(), url, "YouTube request failed");
            return Err(TranscriptError::Api {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        Ok(resp.text().await?)
    }

    /// Loads the watch page, accepting the EU cookie consent interstitial once
    /// if YouTube serves it instead of the video
    #[tracing::instrument(skip(self))]
    async fn fetch_watch_page(&self, video_id: &str) -> Result<WatchPage, TranscriptError> {
        let url = format!("{}?v={}", self.watch_url, video_id);
        let page = WatchPage::from(self.get_text(&url, None).await?);

        let Some(consent) = page.consent_value() else {
            return Ok(page);
        };

        tracing::debug!("Accepting cookie consent interstitial");
        let cookie = format!("CONSENT=YES+{consent}");
        let page = WatchPage::from(self.get_text(&url, Some(cookie)).await?);

        if page.consent_value().is_some() {
            return Err(TranscriptError::ParseError(
                "Failed to get past the cookie consent page",
            ));
        }

        Ok(page)
    }

    #[tracing::instrument(skip_all, fields(language = %track.language_code))]
    async fn fetch_timedtext(
        &self,
        track: &CaptionTrack,
    ) -> Result<Vec<TranscriptSegment>, TranscriptError> {
        let xml = self.get_text(&track.timedtext_url(), None).await?;
        parse_timedtext(&xml)
    }
}

impl TranscriptApi for YouTubeTranscriptApi {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript, TranscriptError> {
        let page = self.fetch_watch_page(video_id).await?;

        if page.is_rate_limited() {
            tracing::warn!(video_id, "YouTube responded with a captcha");
            return Err(TranscriptError::TooManyRequests);
        }

        let player = page.player_response()?;
        let tracks = player.caption_tracks(video_id)?;
        let track = select_track(tracks, &self.languages, video_id)?;

        tracing::info!(
            video_id,
            language = %track.language_code,
            generated = track.is_generated(),
            "Fetching transcript"
        );

        let segments = self
            .fetch_timedtext(track)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to fetch timedtext"))?;

        Ok(Transcript {
            video_id: video_id.to_string(),
            language_code: track.language_code.clone(),
            is_generated: track.is_generated(),
            segments,
        })
    }
}
