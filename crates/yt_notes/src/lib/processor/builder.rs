use crate::{NotesProcessor, Summarizer, TranscriptApi};

pub struct NotesProcessorBuilder<T = (), S = ()> {
    transcript_api: T,
    summarizer: S,
    prompt: Option<String>,
}

impl Default for NotesProcessorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NotesProcessorBuilder {
    pub fn new() -> Self {
        Self {
            transcript_api: (),
            summarizer: (),
            prompt: None,
        }
    }
}

impl<T, S> NotesProcessorBuilder<T, S> {
    pub fn transcript_api<T2: TranscriptApi + Send + Sync + 'static>(
        self,
        transcript_api: T2,
    ) -> NotesProcessorBuilder<T2, S> {
        NotesProcessorBuilder {
            transcript_api,
            summarizer: self.summarizer,
            prompt: self.prompt,
        }
    }

    pub fn summarizer<S2: Summarizer + Send + Sync + 'static>(
        self,
        summarizer: S2,
    ) -> NotesProcessorBuilder<T, S2> {
        NotesProcessorBuilder {
            transcript_api: self.transcript_api,
            summarizer,
            prompt: self.prompt,
        }
    }

    /// Replaces the instruction text put in front of the transcript
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }
}

impl<T, S> NotesProcessorBuilder<T, S>
where
    T: TranscriptApi + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    pub fn build(self) -> NotesProcessor<T, S> {
        let mut processor = NotesProcessor::new(self.transcript_api, self.summarizer);

        if let Some(prompt) = self.prompt {
            processor.prompt = prompt;
        }

        processor
    }
}
