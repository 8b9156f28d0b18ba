use thiserror::Error;

/// Raised when the page markup cannot host a carousel. The carousel stays
/// inert; nothing else on the page is affected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    /// No element matched the track selector.
    #[error("carousel track `{0}` not found")]
    MissingTrack(String),

    /// Neither navigation control is present.
    #[error("neither previous control `{previous}` nor next control `{next}` found")]
    MissingControls { previous: String, next: String },

    /// The track exists but holds no slides.
    #[error("carousel track holds no slides matching `{0}`")]
    NoSlides(String),

    /// A configured selector could not be parsed.
    #[error("invalid selector `{0}`")]
    InvalidSelector(String),
}

/// Waiting for page content that will never arrive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadyError {
    #[error("page content was abandoned before it became ready")]
    Abandoned,
}
