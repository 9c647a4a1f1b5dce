//! The dialogue template document for multi-speaker synthesis.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TtsError};
use crate::voices;

pub const TEMPLATE_FILE: &str = "dialogue_template.json";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SpeakerVoice {
    pub name: String,
    pub voice: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DialogueTemplate {
    pub speakers: Vec<SpeakerVoice>,
    pub content: String,
}

impl DialogueTemplate {
    /// The blank template written by `--create-dialogue-template`.
    pub fn sample() -> Self {
        Self {
            speakers: vec![
                SpeakerVoice {
                    name: "主持人".to_owned(),
                    voice: "Kore".to_owned(),
                },
                SpeakerVoice {
                    name: "嘉賓".to_owned(),
                    voice: "Puck".to_owned(),
                },
            ],
            content: "主持人：歡迎來到我們的節目！今天我們有一位特別的嘉賓。\n\
                      嘉賓：謝謝邀請！很高興能來到這裡。\n\
                      主持人：讓我們開始今天的話題吧。\n\
                      嘉賓：好的，我已經準備好了！"
                .to_owned(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let template: DialogueTemplate = serde_json::from_str(&raw).map_err(|e| {
            TtsError::InvalidInput(format!("{} is not a valid dialogue template: {e}", path.display()))
        })?;
        template.validate()?;
        Ok(template)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self).map_err(|e| {
            TtsError::InvalidInput(format!("failed to serialize dialogue template: {e}"))
        })?;
        json.push('\n');
        fs::write(path, json)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.speakers.len() < 2 {
            return Err(TtsError::InvalidInput(format!(
                "dialogue template needs at least 2 speakers, got {}",
                self.speakers.len()
            )));
        }
        for speaker in &self.speakers {
            if !voices::is_voice(&speaker.voice) {
                return Err(TtsError::InvalidInput(format!(
                    "unknown voice {:?} for speaker {:?}",
                    speaker.voice, speaker.name
                )));
            }
        }
        Ok(())
    }

    /// `(speaker name, voice id)` pairs in template order.
    pub fn speaker_pairs(&self) -> Vec<(String, String)> {
        self.speakers
            .iter()
            .map(|s| (s.name.clone(), s.voice.clone()))
            .collect()
    }
}
