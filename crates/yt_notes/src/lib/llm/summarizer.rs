use std::{fmt::Debug, future::Future};

pub trait Summarizer {
    type Error: Debug;

    /// Name of the model the content is sent to
    fn model(&self) -> &str;

    /// Sends `content` to the model as-is and returns its reply
    fn summarize(
        &self,
        content: &str,
    ) -> impl Future<Output = Result<SummaryResponse, Self::Error>> + Send;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryResponse {
    pub summary: String,
}
