//! # Video ID
//!
//! Extraction of the 11-character YouTube video identifier from a free-form URL.

use std::{fmt, ops::Deref, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use crate::error::Error;

static VIDEO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VideoId(String);

impl VideoId {
    const THUMBNAIL_BASE_URL: &str = "http://img.youtube.com/vi";

    /// Extracts the video id from a YouTube URL.
    ///
    /// The first `v=` query value or path segment made of exactly 11 characters
    /// from `[0-9A-Za-z_-]` wins. Nothing checks that the video exists.
    ///
    /// # Returns
    /// * `Ok(VideoId)` for the first match
    /// * `Err(Error::InvalidUrl)` if the url holds no such pattern
    pub fn from_url(url: &str) -> Result<Self, Error> {
        VIDEO_ID_RE
            .captures(url)
            .and_then(|cap| cap.get(1))
            .map(|m| VideoId(m.as_str().to_string()))
            .ok_or(Error::InvalidUrl)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn thumbnail_url(&self) -> String {
        format!("{}/{}/0.jpg", Self::THUMBNAIL_BASE_URL, self.0)
    }
}

impl Deref for VideoId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VideoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_url(s)
    }
}
