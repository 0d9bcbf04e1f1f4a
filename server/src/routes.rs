use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Deserialize;

use aaslide::{generate_slideshow, ImageGeneration, Mode};
use shared::{ArtifactKind, ErrorResponse, GenerationRequest, GenerationResponse};

use crate::AppState;

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

#[derive(Deserialize, Debug)]
pub struct GenerateParams {
    #[serde(default = "default_style")]
    aa_style: String,
    mock: Option<String>,
}

fn default_style() -> String {
    "default".to_string()
}

/// `mock=true` selects the text-art strategy; anything else selects the
/// image strategy.
fn mode_from_params(params: &GenerateParams) -> Mode {
    if params.mock.as_deref() == Some("true") {
        Mode::TextArt {
            style: params.aa_style.clone(),
        }
    } else {
        Mode::Image
    }
}

fn kind_of(mode: &Mode) -> ArtifactKind {
    match mode {
        Mode::TextArt { .. } => ArtifactKind::Aa,
        Mode::Image => ArtifactKind::Image,
    }
}

fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GenerateParams>,
    Json(body): Json<GenerationRequest>,
) -> Result<Json<GenerationResponse>, (StatusCode, Json<ErrorResponse>)> {
    if body.text.trim().is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "no text was provided",
        ));
    }

    let mode = mode_from_params(&params);
    let kind = kind_of(&mode);
    tracing::info!(?kind, style = %params.aa_style, "handling generate request");

    let started = Instant::now();
    let image = state.image.as_ref().map(|c| c as &dyn ImageGeneration);

    match generate_slideshow(&state.llm, image, &state.prompts, &body.text, &mode).await {
        Ok((dialogues, data)) => {
            tracing::info!(
                lines = dialogues.len(),
                elapsed = ?started.elapsed(),
                "generation finished"
            );
            Ok(Json(GenerationResponse {
                kind,
                dialogues,
                data,
            }))
        }
        Err(err) => {
            // Full detail stays in the operator log; the client only ever
            // sees a generic message.
            tracing::error!(error = %err, elapsed = ?started.elapsed(), "generation failed");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "generation failed, see the server log for details",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use aaslide::{GeminiConfig, PromptStore};

    use super::*;

    fn test_state() -> Arc<AppState> {
        // Validation runs before any upstream call, so a dummy key is fine.
        let llm = GeminiConfig::new("test-key").client().unwrap();
        Arc::new(AppState {
            llm,
            image: None,
            prompts: PromptStore::new("prompts"),
        })
    }

    fn text_art_params() -> GenerateParams {
        GenerateParams {
            aa_style: "default".to_string(),
            mock: Some("true".to_string()),
        }
    }

    #[tokio::test]
    async fn blank_text_is_rejected_with_400() {
        let body = GenerationRequest {
            text: "   \n\t".to_string(),
        };

        let (status, Json(payload)) =
            generate(State(test_state()), Query(text_art_params()), Json(body))
                .await
                .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!payload.error.is_empty());
    }

    #[tokio::test]
    async fn missing_text_field_is_rejected_with_400() {
        let body: GenerationRequest = serde_json::from_str("{}").unwrap();

        let (status, _) = generate(State(test_state()), Query(text_art_params()), Json(body))
            .await
            .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    fn params(aa_style: Option<&str>, mock: Option<&str>) -> GenerateParams {
        serde_json::from_value(serde_json::json!({
            "aa_style": aa_style.unwrap_or("default"),
            "mock": mock,
        }))
        .unwrap()
    }

    #[test]
    fn mock_true_selects_text_art_with_requested_style() {
        let mode = mode_from_params(&params(Some("cat"), Some("true")));
        assert_eq!(
            mode,
            Mode::TextArt {
                style: "cat".to_string()
            }
        );
        assert_eq!(kind_of(&mode), ArtifactKind::Aa);
    }

    #[test]
    fn absent_mock_selects_image_mode() {
        let mode = mode_from_params(&params(None, None));
        assert_eq!(mode, Mode::Image);
        assert_eq!(kind_of(&mode), ArtifactKind::Image);
    }

    #[test]
    fn non_true_mock_selects_image_mode() {
        let mode = mode_from_params(&params(None, Some("false")));
        assert_eq!(mode, Mode::Image);
    }

    #[test]
    fn style_defaults_when_query_omits_it() {
        let p: GenerateParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(p.aa_style, "default");
        assert!(p.mock.is_none());
    }
}
