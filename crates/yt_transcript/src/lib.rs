//! # Transcript Module
//!
//! This module provides functionality for retrieving the caption transcript of a
//! YouTube video, given its video id.
//!
//! The watch page is scraped for the embedded player response, a caption track is
//! picked according to a language preference and the track's timedtext document is
//! parsed into ordered, timed segments.

mod api;
mod domain;
mod player;
mod timedtext;

pub use api::youtube::YouTubeTranscriptApi;
pub use api::TranscriptApi;
pub use domain::{Transcript, TranscriptError, TranscriptSegment};
pub use player::{CaptionTrack, PlayerResponse, WatchPage};
pub use timedtext::parse_timedtext;
