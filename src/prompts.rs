//! Prompt assembly: preview texts, preset prompts, style modifiers and the
//! multi-speaker prompt prefix.

use clap::ValueEnum;

/// Languages that ship with a dedicated preview sentence. Also the default
/// language set for bulk preview pre-generation.
pub const PREVIEW_LANGUAGES: [&str; 5] = ["zh-TW", "zh-CN", "en-US", "ja-JP", "ko-KR"];

/// Self-introduction text spoken in voice previews. Unknown languages fall
/// back to the English template.
pub fn preview_text(voice: &str, language: &str) -> String {
    match language {
        "zh-TW" => format!("您好，我是 {voice}。這是我的聲音預覽，希望您喜歡。"),
        "zh-CN" => format!("您好，我是 {voice}。这是我的声音预览，希望您喜欢。"),
        "ja-JP" => format!("こんにちは、私は{voice}です。これは私の声のプレビューです。"),
        "ko-KR" => format!("안녕하세요, 저는 {voice}입니다. 제 목소리 미리듣기입니다."),
        _ => format!("Hello, I am {voice}. This is a preview of my voice. I hope you like it."),
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PromptType {
    Podcast,
    Audiobook,
    Education,
    Customer,
}

pub fn preset_prompt(kind: PromptType) -> &'static str {
    match kind {
        PromptType::Podcast => {
            "用熱情的播客主持人語氣說：歡迎各位聽眾！今天我們有一個超級精彩的話題要和大家分享。讓我們一起探索人工智慧的奇妙世界！"
        }
        PromptType::Audiobook => {
            "用沉穩的敘事語氣朗讀：月光灑在寧靜的湖面上，微風輕拂著岸邊的蘆葦。遠處傳來夜鶯的歌聲，為這個夏夜增添了一絲詩意。"
        }
        PromptType::Education => {
            "用清晰的教學語氣說：今天我們要學習的是機器學習的基本概念。機器學習是人工智慧的一個分支，它讓電腦能夠從資料中學習，而不需要明確的程式設計。"
        }
        PromptType::Customer => {
            "用友善、專業的語氣說：您好！歡迎致電客戶服務中心。我是您的專屬客服代表，很高興為您提供協助。請問有什麼可以幫助您的嗎？"
        }
    }
}

/// Rewrites the instruction before the first `：` to `{style}地說：`.
/// Prompts without a colon are returned unchanged.
pub fn apply_style(prompt: &str, style: &str) -> String {
    match prompt.split_once('：') {
        Some((_, rest)) => format!("{style}地說：{rest}"),
        None => prompt.to_owned(),
    }
}

/// Prefixes bare user text with a style instruction.
pub fn styled_text(text: &str, style: &str) -> String {
    format!("{style}地說：{text}")
}

/// Assembles the multi-speaker prompt. Without per-speaker styles the
/// dialogue is prefixed with a plain TTS instruction; with styles, one
/// `{name}用{style}語氣說話` clause per styled speaker is emitted instead.
pub fn multi_speaker_prompt(content: &str, speaker_styles: &[(&str, Option<&str>)]) -> String {
    let clauses: Vec<String> = speaker_styles
        .iter()
        .filter_map(|(name, style)| style.map(|s| format!("{name}用{s}語氣說話")))
        .collect();

    if clauses.is_empty() {
        format!("TTS 以下對話：\n{content}")
    } else {
        format!("{}。\n\n{content}", clauses.join("；"))
    }
}
