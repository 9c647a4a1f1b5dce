//! Environment-backed defaults: flag values win, then the process
//! environment, then the built-in defaults.

use std::env;

use crate::client::TtsModel;
use crate::error::{Result, TtsError};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "GEMINI_TTS_MODEL";
pub const DEFAULT_VOICE_ENV: &str = "GEMINI_DEFAULT_VOICE";
pub const DEFAULT_LANGUAGE_ENV: &str = "GEMINI_DEFAULT_LANGUAGE";

/// Flag value first, `GEMINI_API_KEY` second. Empty strings count as
/// absent.
pub fn resolve_api_key(flag: Option<String>) -> Result<String> {
    if let Some(key) = flag.filter(|k| !k.is_empty()) {
        return Ok(key);
    }
    match env::var(API_KEY_ENV) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(TtsError::MissingCredential),
    }
}

pub fn env_default(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.is_empty())
}

/// Flag value first, `GEMINI_TTS_MODEL` second, flash model last. A
/// malformed environment value is warned about, not silently dropped.
pub fn resolve_model(flag: Option<TtsModel>) -> TtsModel {
    if let Some(model) = flag {
        return model;
    }
    match env_default(MODEL_ENV) {
        Some(value) => value.parse().unwrap_or_else(|_| {
            log::warn!(
                "ignoring invalid {MODEL_ENV} value {value:?}; using {}",
                TtsModel::FlashPreview.as_str()
            );
            TtsModel::FlashPreview
        }),
        None => TtsModel::FlashPreview,
    }
}

/// Environment diagnostic for `--check-env`: key presence, length, a
/// masked prefix, a warning for keys wrapped in quotes, and the state of
/// the optional default variables.
pub fn env_report() -> String {
    let mut lines = vec![
        "🔍 Gemini TTS 環境檢查".to_owned(),
        "=".repeat(40),
    ];

    match env::var(API_KEY_ENV) {
        Ok(key) if !key.is_empty() => {
            lines.push(format!("✅ API 金鑰已設定 (長度: {} 字元)", key.chars().count()));
            let prefix: String = key.chars().take(10).collect();
            lines.push(format!("   前 10 個字元: {prefix}..."));
            if key.starts_with('\'') || key.starts_with('"') {
                lines.push("⚠️  警告: API 金鑰包含引號，這可能會導致問題".to_owned());
            }
        }
        _ => {
            lines.push(format!("❌ 未找到 {API_KEY_ENV} 環境變數"));
            lines.push(format!("   範例：export {API_KEY_ENV}=your_api_key_here"));
        }
    }

    for var in [MODEL_ENV, DEFAULT_VOICE_ENV, DEFAULT_LANGUAGE_ENV] {
        match env_default(var) {
            Some(value) => lines.push(format!("✅ {var}={value}")),
            None => lines.push(format!("ℹ️  {var} 未設定（使用內建預設值）")),
        }
    }

    lines.join("\n")
}
