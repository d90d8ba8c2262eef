use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Everything one interaction puts on screen, in display order: the thumbnail,
/// then the notices, then the notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotesPage {
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub notices: Vec<Notice>,
    pub notes: Option<String>,
}

impl NotesPage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.notices.push(Notice {
            level: NoticeLevel::Warning,
            message: message.into(),
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.notices.push(Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        });
    }

    pub fn has_notice(&self, message: &str) -> bool {
        self.notices.iter().any(|n| n.message == message)
    }
}
