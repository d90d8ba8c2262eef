mod error;
mod llm;
mod page;
mod processor;
pub mod render;
pub mod server;
pub mod tracing;
pub mod video_id;

pub use error::Error;
pub use llm::gemini;
pub use llm::summarizer::{Summarizer, SummaryResponse};
pub use page::{NotesPage, Notice, NoticeLevel};
pub use processor::{builder::NotesProcessorBuilder, NotesProcessor};
pub use video_id::VideoId;
pub use yt_transcript::{
    Transcript, TranscriptApi, TranscriptError, TranscriptSegment, YouTubeTranscriptApi,
};
