use std::path::PathBuf;

use async_trait::async_trait;
use miette::Result;

pub use crate::error::GenerateError;
pub use crate::gemini::{Config as GeminiConfig, GeminiClient};
pub use crate::image::ImageClient;
pub use crate::prompts::PromptStore;

pub mod error;
pub mod gemini;
mod http;
pub mod image;
pub mod prompts;

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_PROMPTS_DIR: &str = "prompts";

/// Process-wide configuration, read from the environment once at startup
/// and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub image_api_key: Option<String>,
    pub prompts_dir: PathBuf,
    pub bind_addr: String,
}

impl Config {
    /// The language-model credential is mandatory; the image credential is
    /// optional and its absence only disables the image strategy.
    pub fn from_env() -> Result<Self> {
        let gemini = GeminiConfig::from_env()?;

        let image_api_key = std::env::var(image::IMAGE_API_KEY_VAR).ok();
        if image_api_key.is_none() {
            tracing::warn!(
                "{} is not set, image generation is disabled",
                image::IMAGE_API_KEY_VAR
            );
        }

        let prompts_dir = std::env::var("PROMPTS_DIR")
            .unwrap_or_else(|_| DEFAULT_PROMPTS_DIR.to_string())
            .into();
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            gemini,
            image_api_key,
            prompts_dir,
            bind_addr,
        })
    }
}

/// Prompt in, text out.
#[async_trait]
pub trait TextGeneration: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Scene description in, image URL out.
#[async_trait]
pub trait ImageGeneration: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Which artifact strategy a request selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    TextArt { style: String },
    Image,
}

/// Split a raw model response into dialogue lines: trim each line, drop the
/// blank ones, keep the rest in the model's order. Total and side-effect
/// free.
pub fn dialogue_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ask the model to rewrite the user's text as a two-speaker dialogue.
/// An empty line list is an error: there is nothing to illustrate.
pub async fn generate_dialogue(
    llm: &dyn TextGeneration,
    prompts: &PromptStore,
    user_text: &str,
) -> Result<Vec<String>, GenerateError> {
    let mut template = prompts.load(prompts::CONVERSATION_PROMPT);
    if template.is_empty() {
        template = prompts::DEFAULT_CONVERSATION_PROMPT.to_string();
    }

    let prompt = prompts::fill(&template, "user_text", user_text);
    let raw = llm.generate_text(&prompt).await?;

    let lines = dialogue_lines(&raw);
    if lines.is_empty() {
        return Err(GenerateError::EmptyDialogue);
    }
    Ok(lines)
}

/// Render one dialogue line as text art. Styles have no generic fallback:
/// an unknown style fails the whole request.
pub async fn render_text_art(
    llm: &dyn TextGeneration,
    prompts: &PromptStore,
    line: &str,
    style: &str,
) -> Result<String, GenerateError> {
    let name = prompts::aa_prompt_name(style);
    let template = prompts.load(&name);
    if template.is_empty() {
        return Err(GenerateError::TemplateNotFound(name));
    }

    let prompt = prompts::fill(&template, "dialogue", line);
    llm.generate_text(&prompt).await
}

/// Render one dialogue line as an image URL: ask the model for an English
/// scene description, then hand that to the image service.
pub async fn render_image(
    llm: &dyn TextGeneration,
    image: &dyn ImageGeneration,
    prompts: &PromptStore,
    line: &str,
) -> Result<String, GenerateError> {
    let mut template = prompts.load(prompts::IMAGE_PROMPT);
    if template.is_empty() {
        template = prompts::DEFAULT_IMAGE_PROMPT.to_string();
    }

    let prompt = prompts::fill(&template, "dialogue", line);
    let description = llm.generate_text(&prompt).await?;

    image.generate_image(description.trim()).await
}

/// The whole pipeline: dialogue lines first, then one artifact per line in
/// order. The first artifact failure aborts the rest; a request either
/// fully completes or fails as a whole.
pub async fn generate_slideshow(
    llm: &dyn TextGeneration,
    image: Option<&dyn ImageGeneration>,
    prompts: &PromptStore,
    user_text: &str,
    mode: &Mode,
) -> Result<(Vec<String>, Vec<String>), GenerateError> {
    #[derive(Clone, Copy)]
    enum Strategy<'a> {
        TextArt(&'a str),
        Image(&'a dyn ImageGeneration),
    }

    // Resolve the strategy up front: image mode without the credential
    // configured fails here, before any network traffic.
    let strategy = match mode {
        Mode::TextArt { style } => Strategy::TextArt(style),
        Mode::Image => Strategy::Image(image.ok_or(GenerateError::MissingImageCredential(
            image::IMAGE_API_KEY_VAR,
        ))?),
    };

    let dialogues = generate_dialogue(llm, prompts, user_text).await?;
    tracing::debug!(lines = dialogues.len(), "generated dialogue");

    let mut data = Vec::with_capacity(dialogues.len());
    for line in &dialogues {
        let artifact = match strategy {
            Strategy::TextArt(style) => render_text_art(llm, prompts, line, style).await?,
            Strategy::Image(service) => render_image(llm, service, prompts, line).await?,
        };
        data.push(artifact);
    }

    Ok((dialogues, data))
}
