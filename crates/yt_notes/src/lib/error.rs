#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid YouTube URL")]
    InvalidUrl,
    #[error("Failed to render page: {0}")]
    Render(#[from] minijinja::Error),
}
