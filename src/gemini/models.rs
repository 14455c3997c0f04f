//! Serde models for the Gemini `generateContent` wire format.

use serde::Deserialize;

/// Top-level success response.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
pub struct Part {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenate the text parts of the first candidate.
    ///
    /// Returns `None` when there is no candidate or no text part at all.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let mut full_text = String::new();
        for part in &candidate.content.parts {
            if let Some(text) = &part.text {
                full_text.push_str(text);
            }
        }
        if full_text.is_empty() {
            None
        } else {
            Some(full_text)
        }
    }
}

/// Error envelope returned by the API on non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_concatenates_first_candidate_parts() {
        let json = r###"{
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "## 議事録\n" },
                        { "text": "話者A: こんにちは" }
                    ]
                },
                "finishReason": "STOP"
            }]
        }"###;

        let response: GenerateContentResponse = serde_json::from_str(json).expect("parse");
        assert_eq!(
            response.text().as_deref(),
            Some("## 議事録\n話者A: こんにちは")
        );
        assert_eq!(
            response.candidates[0].finish_reason.as_deref(),
            Some("STOP")
        );
    }

    #[test]
    fn empty_candidates_yield_none() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": []}"#).expect("parse");
        assert!(response.text().is_none());
    }

    #[test]
    fn non_text_parts_are_skipped() {
        let json = r#"{
            "candidates": [{
                "content": { "parts": [ {}, { "text": "本文" } ] }
            }]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).expect("parse");
        assert_eq!(response.text().as_deref(), Some("本文"));
    }

    #[test]
    fn error_envelope_parses() {
        let json = r#"{
            "error": {
                "code": 429,
                "message": "Resource has been exhausted (e.g. check quota).",
                "status": "RESOURCE_EXHAUSTED"
            }
        }"#;

        let parsed: ApiErrorResponse = serde_json::from_str(json).expect("parse");
        assert!(parsed.error.message.contains("exhausted"));
        assert_eq!(parsed.error.status.as_deref(), Some("RESOURCE_EXHAUSTED"));
    }
}
