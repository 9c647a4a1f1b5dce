//! Synthesis gateway: the Gemini `generateContent` REST call.

use std::str::FromStr;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use clap::ValueEnum;

use crate::error::{Result, TtsError};
use crate::preview::Synthesizer;
use crate::prompts;
use crate::types::{ApiErrorBody, GenerateContentRequest, GenerateContentResponse, SpeechConfig};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TtsModel {
    #[value(name = "gemini-2.5-flash-preview-tts")]
    FlashPreview,
    #[value(name = "gemini-2.5-pro-preview-tts")]
    ProPreview,
}

impl TtsModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TtsModel::FlashPreview => "gemini-2.5-flash-preview-tts",
            TtsModel::ProPreview => "gemini-2.5-pro-preview-tts",
        }
    }
}

impl FromStr for TtsModel {
    type Err = TtsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gemini-2.5-flash-preview-tts" => Ok(TtsModel::FlashPreview),
            "gemini-2.5-pro-preview-tts" => Ok(TtsModel::ProPreview),
            other => Err(TtsError::InvalidInput(format!("unknown TTS model: {other}"))),
        }
    }
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: TtsModel,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: TtsModel) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            model,
        }
    }

    /// Points the client at a different endpoint. For tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> TtsModel {
        self.model
    }

    /// One `generateContent` round-trip. Returns the decoded PCM payload.
    pub async fn generate(&self, prompt: &str, speech_config: SpeechConfig) -> Result<Vec<u8>> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            self.model.as_str()
        );
        let body = GenerateContentRequest::new(prompt, speech_config);

        log::debug!("POST {url}");
        let resp = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|b| b.error.message)
                .unwrap_or(text);
            return Err(TtsError::Transport(format!("{status}: {message}")));
        }

        let parsed: GenerateContentResponse = resp.json().await?;
        extract_audio(parsed)
    }

    pub async fn synthesize_single(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        self.generate(text, SpeechConfig::single(voice)).await
    }

    /// Multi-speaker synthesis. The endpoint requires at least two speaker
    /// configurations; fewer is rejected before any network traffic.
    pub async fn synthesize_multi(
        &self,
        prompt: &str,
        speakers: &[(String, String)],
    ) -> Result<Vec<u8>> {
        if speakers.len() < 2 {
            return Err(TtsError::InvalidInput(format!(
                "multi-speaker synthesis needs at least 2 speakers, got {}",
                speakers.len()
            )));
        }
        let pairs = speakers.iter().map(|(s, v)| (s.as_str(), v.as_str()));
        self.generate(prompt, SpeechConfig::multi(pairs)).await
    }
}

/// Walks `candidates[0].content.parts[0].inlineData.data`. Any missing
/// link means the call succeeded at the transport level but carried no
/// audio.
fn extract_audio(resp: GenerateContentResponse) -> Result<Vec<u8>> {
    let data = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.inline_data)
        .map(|d| d.data)
        .ok_or(TtsError::EmptyResponse)?;

    BASE64
        .decode(data.as_bytes())
        .map_err(|e| TtsError::Transport(format!("audio payload is not valid base64: {e}")))
}

#[async_trait]
impl Synthesizer for GeminiClient {
    async fn synthesize_preview(&self, voice: &str, language: &str) -> Result<Vec<u8>> {
        let text = prompts::preview_text(voice, language);
        self.synthesize_single(&text, voice).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn extract_decodes_base64_payload() {
        let resp = response(json!({
            "candidates": [{
                "content": {"parts": [{"inlineData": {"data": BASE64.encode([1u8, 2, 3])}}]}
            }]
        }));
        assert_eq!(extract_audio(resp).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn missing_candidates_is_empty_response() {
        let err = extract_audio(response(json!({}))).unwrap_err();
        assert!(matches!(err, TtsError::EmptyResponse));
    }

    #[test]
    fn missing_parts_is_empty_response() {
        let resp = response(json!({"candidates": [{"content": {"parts": []}}]}));
        assert!(matches!(
            extract_audio(resp).unwrap_err(),
            TtsError::EmptyResponse
        ));
    }

    #[test]
    fn missing_inline_data_is_empty_response() {
        let resp = response(json!({
            "candidates": [{"content": {"parts": [{"text": "no audio here"}]}}]
        }));
        assert!(matches!(
            extract_audio(resp).unwrap_err(),
            TtsError::EmptyResponse
        ));
    }

    #[tokio::test]
    async fn multi_speaker_requires_two_speakers() {
        let client = GeminiClient::new("key", TtsModel::FlashPreview);
        let err = client
            .synthesize_multi("prompt", &[("A".to_owned(), "Kore".to_owned())])
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::InvalidInput(_)));
    }

    #[test]
    fn model_ids_round_trip() {
        assert_eq!(
            "gemini-2.5-flash-preview-tts".parse::<TtsModel>().unwrap(),
            TtsModel::FlashPreview
        );
        assert_eq!(
            TtsModel::ProPreview.as_str(),
            "gemini-2.5-pro-preview-tts"
        );
        assert!("gemini-1.0".parse::<TtsModel>().is_err());
    }
}
