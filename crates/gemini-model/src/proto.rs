use serde::{Deserialize, Serialize};

const PROMPT_TEMPLATE: &str = include_str!("prompt.md");

/// Shown when the model answered without any text.
pub const NO_CONTENT_REPLY: &str = "Sorry, I could not process your request.";

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NO_CONTENT_REPLY.to_owned())
    }
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct Part {
    text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

// -----------
// Conversions
// -----------

/// Wraps the user's message in the Mr.Doctor instructions.
#[inline]
pub fn render_prompt(message: &str) -> String {
    PROMPT_TEMPLATE.trim_end().replace("{{MESSAGE}}", message)
}

#[inline]
pub fn create_request(message: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: render_prompt(message),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 200,
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_request() {
        let value = serde_json::to_value(create_request("enaku thalai vali"))
            .unwrap();
        let config = &value["generationConfig"];
        assert_eq!(config["topK"], json!(40));
        assert_eq!(config["maxOutputTokens"], json!(200));
        assert!((config["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!((config["topP"].as_f64().unwrap() - 0.95).abs() < 1e-6);

        let text = value["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("You are Mr.Doctor"));
        assert!(text.contains("User message: enaku thalai vali\n"));
        assert!(text.ends_with("⚠️ **See doctor if:** [warning signs]"));
        assert!(!text.contains("{{MESSAGE}}"));
    }

    #[test]
    fn test_into_text() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "🩺 **Fever:**"}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(resp.into_text(), "🩺 **Fever:**");

        let resp: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]}))
                .unwrap();
        assert_eq!(resp.into_text(), NO_CONTENT_REPLY);

        let resp: GenerateContentResponse =
            serde_json::from_value(json!({})).unwrap();
        assert_eq!(resp.into_text(), NO_CONTENT_REPLY);
    }
}
