use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while generating a slideshow. The server
/// maps all of these to a generic 500; the display strings are for the
/// operator log only.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("prompt template '{0}' was not found")]
    TemplateNotFound(String),
    #[error("the model returned no usable dialogue lines")]
    EmptyDialogue,
    #[error("image generation requires {0} to be set")]
    MissingImageCredential(&'static str),
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    UpstreamStatus { status: StatusCode, body: String },
    #[error("unexpected upstream response: {body}")]
    ResponseFormat { body: String },
}
