//! # Watch page parsing
//!
//! Extracts the `ytInitialPlayerResponse` object embedded in a YouTube watch page
//! and exposes the caption tracks it advertises.

use std::{ops::Deref, sync::LazyLock};

use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::TranscriptError;

static PLAYER_RESPONSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ytInitialPlayerResponse\s*=\s*\{").unwrap());

static CONSENT_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"name="v" value="(.*?)""#).unwrap());

pub struct WatchPage(String);

impl Deref for WatchPage {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for WatchPage {
    fn from(value: String) -> Self {
        WatchPage(value)
    }
}

impl WatchPage {
    pub fn new(doc: String) -> Self {
        WatchPage(doc)
    }

    /// YouTube serves a captcha instead of the player when an address sends too
    /// many requests
    pub fn is_rate_limited(&self) -> bool {
        self.contains(r#"class="g-recaptcha""#)
    }

    /// Returns the value to put in the `CONSENT` cookie when the page is the EU
    /// cookie consent interstitial rather than the video itself
    pub fn consent_value(&self) -> Option<&str> {
        if !self.contains(r#"action="https://consent.youtube.com/s""#) {
            return None;
        }

        CONSENT_VALUE_RE
            .captures(self)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str())
    }

    /// Parses the player response object assigned in the page's inline script.
    ///
    /// Only the first JSON value after the assignment is read, so whatever
    /// statements follow it in the same script tag are ignored.
    pub fn player_response(&self) -> Result<PlayerResponse, TranscriptError> {
        let start = PLAYER_RESPONSE_RE
            .find(self)
            .map(|m| m.end() - 1)
            .ok_or(TranscriptError::ParseError(
                "Failed to find ytInitialPlayerResponse in the watch page",
            ))?;

        serde_json::Deserializer::from_str(&self.0[start..])
            .into_iter::<PlayerResponse>()
            .next()
            .ok_or(TranscriptError::ParseError(
                "ytInitialPlayerResponse is not followed by a JSON object",
            ))?
            .map_err(TranscriptError::from)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub playability_status: Option<PlayabilityStatus>,
    pub captions: Option<Captions>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayabilityStatus {
    pub status: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Captions {
    pub player_captions_tracklist_renderer: Option<CaptionTracklist>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTracklist {
    #[serde(default)]
    pub caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    /// `"asr"` for automatically generated tracks
    pub kind: Option<String>,
}

impl CaptionTrack {
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }

    /// The timedtext document url with any `fmt` parameter dropped, so the
    /// default XML format is served
    pub fn timedtext_url(&self) -> String {
        let Ok(mut url) = Url::parse(&self.base_url) else {
            return self.base_url.clone();
        };

        let pairs = url
            .query_pairs()
            .filter(|(key, _)| key != "fmt")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect::<Vec<_>>();

        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(pairs);
        }

        url.into()
    }
}

impl PlayerResponse {
    /// Returns the caption tracks of a playable video.
    ///
    /// # Returns
    /// * `Err(VideoUnavailable)` when the player refuses to play the video
    /// * `Err(TranscriptsDisabled)` when the video advertises no caption track
    pub fn caption_tracks(&self, video_id: &str) -> Result<&[CaptionTrack], TranscriptError> {
        if let Some(status) = &self.playability_status {
            if status.status != "OK" {
                return Err(TranscriptError::VideoUnavailable {
                    video_id: video_id.to_string(),
                    reason: status.reason.clone().unwrap_or_else(|| status.status.clone()),
                });
            }
        }

        let tracks = self
            .captions
            .as_ref()
            .and_then(|c| c.player_captions_tracklist_renderer.as_ref())
            .map(|r| r.caption_tracks.as_slice())
            .unwrap_or_default();

        if tracks.is_empty() {
            return Err(TranscriptError::TranscriptsDisabled {
                video_id: video_id.to_string(),
            });
        }

        Ok(tracks)
    }
}

/// Picks the first requested language that has a track, preferring a manually
/// created track over a generated one for the same language.
pub fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    languages: &[String],
    video_id: &str,
) -> Result<&'a CaptionTrack, TranscriptError> {
    for language in languages {
        let mut candidates = tracks.iter().filter(|t| &t.language_code == language);
        let manual = candidates.clone().find(|t| !t.is_generated());

        if let Some(track) = manual.or_else(|| candidates.next()) {
            return Ok(track);
        }
    }

    Err(TranscriptError::NoTranscriptFound {
        video_id: video_id.to_string(),
        requested: languages.to_vec(),
        available: tracks.iter().map(|t| t.language_code.clone()).collect(),
    })
}
