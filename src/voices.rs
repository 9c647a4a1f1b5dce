//! Prebuilt voice and language catalogs for the Gemini TTS models.

pub const DEFAULT_VOICE: &str = "Kore";
pub const DEFAULT_LANGUAGE: &str = "zh-TW";

/// The 30 prebuilt voices, each with its bilingual descriptor.
pub const VOICES: [(&str, &str); 30] = [
    ("Zephyr", "明亮 (Bright)"),
    ("Puck", "活潑 (Upbeat)"),
    ("Charon", "資訊性 (Informative)"),
    ("Kore", "堅定 (Firm)"),
    ("Fenrir", "興奮 (Excitable)"),
    ("Leda", "年輕 (Youthful)"),
    ("Orus", "堅定 (Firm)"),
    ("Aoede", "輕快 (Breezy)"),
    ("Callirrhoe", "隨和 (Easy-going)"),
    ("Autonoe", "明亮 (Bright)"),
    ("Enceladus", "氣息感 (Breathy)"),
    ("Iapetus", "清晰 (Clear)"),
    ("Umbriel", "隨和 (Easy-going)"),
    ("Algieba", "流暢 (Smooth)"),
    ("Despina", "流暢 (Smooth)"),
    ("Erinome", "清晰 (Clear)"),
    ("Algenib", "沙啞 (Gravelly)"),
    ("Rasalgethi", "資訊性 (Informative)"),
    ("Laomedeia", "活潑 (Upbeat)"),
    ("Achernar", "柔和 (Soft)"),
    ("Alnilam", "堅定 (Firm)"),
    ("Schedar", "平穩 (Even)"),
    ("Gacrux", "成熟 (Mature)"),
    ("Pulcherrima", "前進 (Forward)"),
    ("Achird", "友善 (Friendly)"),
    ("Zubenelgenubi", "隨意 (Casual)"),
    ("Vindemiatrix", "溫柔 (Gentle)"),
    ("Sadachbia", "活潑 (Lively)"),
    ("Sadaltager", "博學 (Knowledgeable)"),
    ("Sulafat", "溫暖 (Warm)"),
];

/// Supported language codes with display names.
pub const SUPPORTED_LANGUAGES: [(&str, &str); 26] = [
    ("ar-EG", "阿拉伯語 (埃及)"),
    ("en-US", "英語 (美國)"),
    ("de-DE", "德語 (德國)"),
    ("es-US", "西班牙語 (美國)"),
    ("fr-FR", "法語 (法國)"),
    ("hi-IN", "印地語 (印度)"),
    ("id-ID", "印尼語 (印尼)"),
    ("it-IT", "義大利語 (義大利)"),
    ("ja-JP", "日語 (日本)"),
    ("ko-KR", "韓語 (韓國)"),
    ("pt-BR", "葡萄牙語 (巴西)"),
    ("ru-RU", "俄語 (俄羅斯)"),
    ("nl-NL", "荷蘭語 (荷蘭)"),
    ("pl-PL", "波蘭語 (波蘭)"),
    ("th-TH", "泰語 (泰國)"),
    ("tr-TR", "土耳其語 (土耳其)"),
    ("vi-VN", "越南語 (越南)"),
    ("ro-RO", "羅馬尼亞語 (羅馬尼亞)"),
    ("uk-UA", "烏克蘭語 (烏克蘭)"),
    ("bn-BD", "孟加拉語 (孟加拉)"),
    ("en-IN", "英語 (印度)"),
    ("mr-IN", "馬拉地語 (印度)"),
    ("ta-IN", "泰米爾語 (印度)"),
    ("te-IN", "泰盧固語 (印度)"),
    ("zh-CN", "中文 (簡體)"),
    ("zh-TW", "中文 (繁體)"),
];

pub fn voice_names() -> impl Iterator<Item = &'static str> {
    VOICES.iter().map(|(name, _)| *name)
}

pub fn is_voice(name: &str) -> bool {
    VOICES.iter().any(|(v, _)| *v == name)
}

pub fn voice_description(name: &str) -> Option<&'static str> {
    VOICES
        .iter()
        .find(|(v, _)| *v == name)
        .map(|(_, desc)| *desc)
}

pub fn is_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|(c, _)| *c == code)
}

pub fn language_name(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}
