use thiserror::Error;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Failure taxonomy for the whole crate.
///
/// `Transport` and `EmptyResponse` are deliberately distinct: an empty
/// response means the API answered but carried no audio (usually a
/// content or speaker-name formatting problem), while a transport error
/// is a network, auth or quota failure.
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("no API key provided; pass --api-key or set the GEMINI_API_KEY environment variable")]
    MissingCredential,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("synthesis request failed: {0}")]
    Transport(String),

    #[error("the API returned no audio data; check that speaker names in the text match the configured speakers")]
    EmptyResponse,

    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode wav: {0}")]
    Wav(#[from] hound::Error),
}

impl From<reqwest::Error> for TtsError {
    fn from(err: reqwest::Error) -> Self {
        TtsError::Transport(err.to_string())
    }
}
