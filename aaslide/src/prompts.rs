use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use indoc::indoc;

pub const CONVERSATION_PROMPT: &str = "conversation_generation";
pub const IMAGE_PROMPT: &str = "image_prompt_generation";

/// Used when `conversation_generation.md` is missing from the prompts dir.
pub const DEFAULT_CONVERSATION_PROMPT: &str = indoc! {"
    Rewrite the following text as a natural dialogue between two speakers,
    A and B. Make the scenario playful and creative. Put every line of
    dialogue on its own line.
    Example:
    A: Nice weather today!
    B: It really is. Makes me want to go somewhere.

    --- START OF TEXT ---
    {user_text}
    --- END OF TEXT ---
"};

/// Used when `image_prompt_generation.md` is missing from the prompts dir.
pub const DEFAULT_IMAGE_PROMPT: &str = indoc! {"
    Write one short English sentence describing an illustration for the
    following line of dialogue. Reply with the description only.

    Dialogue: {dialogue}
"};

/// Loads named prompt templates from a directory. Templates are read per
/// request and never cached.
#[derive(Debug, Clone)]
pub struct PromptStore {
    dir: PathBuf,
}

impl PromptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load `<dir>/<name>.md` and strip its title block. A missing file is
    /// not an error and yields an empty string; the caller decides whether
    /// a fallback exists for that template kind.
    pub fn load(&self, name: &str) -> String {
        let path = self.dir.join(format!("{name}.md"));
        match fs::read_to_string(&path) {
            Ok(raw) => strip_title(&raw),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::warn!(template = name, "prompt template not found");
                String::new()
            }
            Err(err) => {
                tracing::error!(template = name, error = %err, "failed to read prompt template");
                String::new()
            }
        }
    }
}

/// The resource name for a given text-art style.
pub fn aa_prompt_name(style: &str) -> String {
    format!("aa_generation_{style}")
}

/// Drop the leading Markdown title block: heading lines and blank lines
/// before the first content line. Everything after the first content line
/// is kept as-is, including later blank and heading lines.
pub fn strip_title(raw: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for line in raw.lines() {
        let trimmed = line.trim();
        if kept.is_empty() && (trimmed.is_empty() || trimmed.starts_with('#')) {
            continue;
        }
        kept.push(line);
    }
    kept.join("\n").trim().to_string()
}

/// Substitute every `{name}` placeholder in the template with `value`.
pub fn fill(template: &str, name: &str, value: &str) -> String {
    template.replace(&format!("{{{name}}}"), value)
}
