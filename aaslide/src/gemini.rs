use miette::{Context, IntoDiagnostic, Result};
use reqwest::header::{HeaderName, HeaderValue};

use crate::APP_USER_AGENT;

pub(crate) mod completion;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";

pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone)]
pub struct Config {
    api_key: String,
}

/// Client for the Gemini `generateContent` endpoint. Built once at startup
/// and shared by every request.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(GEMINI_API_KEY_VAR)
            .into_diagnostic()
            .wrap_err("Could not find GEMINI_API_KEY env var")?;

        Ok(Self { api_key })
    }

    pub fn client(&self) -> Result<GeminiClient> {
        let mut headers = reqwest::header::HeaderMap::new();

        let mut value = HeaderValue::from_str(&self.api_key)
            .into_diagnostic()
            .wrap_err("Could not create header value")?;
        value.set_sensitive(true);

        headers.insert(HeaderName::from_static("x-goog-api-key"), value);

        let http = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .default_headers(headers)
            .build()
            .into_diagnostic()
            .wrap_err("Could not build reqwest client")?;

        Ok(GeminiClient {
            http,
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }
}
