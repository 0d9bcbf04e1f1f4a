use serde::{Deserialize, Serialize};

/// Which kind of artifact a response carries. One kind per batch,
/// mixed batches are not supported.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Aa,
    Image,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GenerationRequest {
    /// An absent field is treated like blank text so the handler can
    /// answer 400 instead of a body-rejection status.
    #[serde(default)]
    pub text: String,
}

/// `dialogues` and `data` are parallel: `data[i]` is the artifact
/// rendered from `dialogues[i]`.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GenerationResponse {
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    pub dialogues: Vec<String>,
    pub data: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ErrorResponse {
    pub error: String,
}
