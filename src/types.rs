//! Wire types for the Gemini `generateContent` REST call.
//!
//! The API speaks camelCase JSON; every struct here renames accordingly so
//! the serialized shapes match the endpoint bit for bit.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    pub fn new(prompt: &str, speech_config: SpeechConfig) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_owned()),
                    inline_data: None,
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["AUDIO".to_owned()],
                speech_config,
            },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Base64-encoded linear PCM.
    pub data: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
    pub speech_config: SpeechConfig,
}

/// Either a single prebuilt voice or an ordered multi-speaker mapping.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_config: Option<VoiceConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_speaker_voice_config: Option<MultiSpeakerVoiceConfig>,
}

impl SpeechConfig {
    pub fn single(voice: &str) -> Self {
        Self {
            voice_config: Some(VoiceConfig::prebuilt(voice)),
            multi_speaker_voice_config: None,
        }
    }

    pub fn multi<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let speaker_voice_configs = pairs
            .into_iter()
            .map(|(speaker, voice)| SpeakerVoiceConfig {
                speaker: speaker.to_owned(),
                voice_config: VoiceConfig::prebuilt(voice),
            })
            .collect();
        Self {
            voice_config: None,
            multi_speaker_voice_config: Some(MultiSpeakerVoiceConfig {
                speaker_voice_configs,
            }),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

impl VoiceConfig {
    fn prebuilt(voice: &str) -> Self {
        Self {
            prebuilt_voice_config: PrebuiltVoiceConfig {
                voice_name: voice.to_owned(),
            },
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    pub voice_name: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MultiSpeakerVoiceConfig {
    pub speaker_voice_configs: Vec<SpeakerVoiceConfig>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerVoiceConfig {
    pub speaker: String,
    pub voice_config: VoiceConfig,
}

#[derive(Deserialize, Debug, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

/// Error envelope the API returns on non-2xx statuses.
#[derive(Deserialize, Debug)]
pub struct ApiErrorBody {
    pub error: ApiError,
}

#[derive(Deserialize, Debug)]
pub struct ApiError {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_speaker_request_shape() {
        let req = GenerateContentRequest::new("你好", SpeechConfig::single("Kore"));
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{"parts": [{"text": "你好"}]}],
                "generationConfig": {
                    "responseModalities": ["AUDIO"],
                    "speechConfig": {
                        "voiceConfig": {
                            "prebuiltVoiceConfig": {"voiceName": "Kore"}
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn multi_speaker_request_shape() {
        let req = GenerateContentRequest::new(
            "TTS 以下對話：\nA：嗨",
            SpeechConfig::multi([("主持人", "Kore"), ("嘉賓", "Puck")]),
        );
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value["generationConfig"]["speechConfig"],
            json!({
                "multiSpeakerVoiceConfig": {
                    "speakerVoiceConfigs": [
                        {
                            "speaker": "主持人",
                            "voiceConfig": {"prebuiltVoiceConfig": {"voiceName": "Kore"}}
                        },
                        {
                            "speaker": "嘉賓",
                            "voiceConfig": {"prebuiltVoiceConfig": {"voiceName": "Puck"}}
                        }
                    ]
                }
            })
        );
    }

    #[test]
    fn response_parses_inline_data() {
        let body = json!({
            "candidates": [{
                "content": {
                    "parts": [{"inlineData": {"mimeType": "audio/L16;rate=24000", "data": "AAAA"}}]
                }
            }]
        });
        let resp: GenerateContentResponse = serde_json::from_value(body).unwrap();
        let data = resp.candidates[0]
            .content
            .as_ref()
            .and_then(|c| c.parts.first())
            .and_then(|p| p.inline_data.as_ref())
            .map(|d| d.data.clone());
        assert_eq!(data.as_deref(), Some("AAAA"));
    }
}
