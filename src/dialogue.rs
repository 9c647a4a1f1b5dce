//! Dialogue parsing and speaker normalization.
//!
//! Uploaded transcripts come in two shapes: SRT-style subtitle blocks and
//! freeform `label：text` lines. Both are reduced to an ordered sequence of
//! [`Utterance`]s whose speakers are mapped onto two canonical slots,
//! `Speaker1` and `Speaker2`. The multi-speaker synthesis endpoint drives
//! at most two concurrent voices, so inputs with more than two distinct
//! labels collapse onto the two slots round-robin. Known constraint, kept
//! for compatibility with existing transcripts.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Result, TtsError};

/// The canonical speaker slots.
pub const SPEAKER_SLOTS: [&str; 2] = ["Speaker1", "Speaker2"];

/// One attributed unit of dialogue. Order in the containing sequence is
/// the turn order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub speaker: String,
    pub text: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SourceKind {
    Subtitle,
    PlainText,
}

impl SourceKind {
    /// Subtitle parsing for `.srt` files, plain text for everything else.
    pub fn from_file_name(name: &str) -> Self {
        if name.ends_with(".srt") {
            SourceKind::Subtitle
        } else {
            SourceKind::PlainText
        }
    }
}

// Leading `label:` / `label：`; the label is any non-empty run of
// non-colon characters, spaces included.
fn speaker_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([^:：]+)[：:](.*)$").unwrap())
}

/// Parses raw transcript text into utterances plus the original speaker
/// labels in first-seen order. Subtitle input never reports original
/// labels.
pub fn parse(content: &str, kind: SourceKind) -> (Vec<Utterance>, Vec<String>) {
    match kind {
        SourceKind::Subtitle => (parse_subtitle(content), Vec::new()),
        SourceKind::PlainText => parse_plain_text(content),
    }
}

/// Splits subtitle input on blank-line-delimited blocks. A valid block has
/// at least three lines (index, timing, text); shorter blocks are dropped.
/// Unlabeled blocks alternate between the two canonical slots, starting at
/// `Speaker1`; a leading `label：` in the joined text wins over alternation
/// and does not flip it.
pub fn parse_subtitle(content: &str) -> Vec<Utterance> {
    let mut utterances = Vec::new();
    let mut toggle = 0usize;

    for block in content.trim().split("\n\n") {
        let lines: Vec<&str> = block.trim().lines().collect();
        if lines.len() < 3 {
            continue;
        }
        let text = lines[2..].join(" ").trim().to_owned();
        if text.is_empty() {
            continue;
        }

        if let Some(caps) = speaker_line().captures(&text) {
            utterances.push(Utterance {
                speaker: caps[1].trim().to_owned(),
                text: caps[2].trim().to_owned(),
            });
        } else {
            utterances.push(Utterance {
                speaker: SPEAKER_SLOTS[toggle].to_owned(),
                text,
            });
            toggle = 1 - toggle;
        }
    }

    utterances
}

/// Parses freeform dialogue text. Labeled lines establish (or switch to)
/// a speaker; unlabeled lines continue the current speaker, or open the
/// dialogue under `Speaker1` when no speaker has been seen yet.
pub fn parse_plain_text(content: &str) -> (Vec<Utterance>, Vec<String>) {
    let mut utterances = Vec::new();
    let mut original_speakers = Vec::new();
    let mut slot_map: HashMap<String, String> = HashMap::new();
    let mut current: Option<String> = None;

    for line in content.trim().lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = speaker_line().captures(line) {
            let label = caps[1].trim().to_owned();
            let text = caps[2].trim().to_owned();

            if !slot_map.contains_key(&label) {
                let slot = SPEAKER_SLOTS[slot_map.len() % 2].to_owned();
                original_speakers.push(label.clone());
                slot_map.insert(label.clone(), slot);
            }
            let slot = slot_map[&label].clone();
            if !text.is_empty() {
                utterances.push(Utterance {
                    speaker: slot.clone(),
                    text,
                });
            }
            current = Some(slot);
        } else if let Some(speaker) = &current {
            utterances.push(Utterance {
                speaker: speaker.clone(),
                text: line.to_owned(),
            });
        } else {
            let slot = SPEAKER_SLOTS[0].to_owned();
            utterances.push(Utterance {
                speaker: slot.clone(),
                text: line.to_owned(),
            });
            current = Some(slot);
        }
    }

    (utterances, original_speakers)
}

/// Renders utterances as `"{name}：{text}"` lines, substituting custom
/// names for the canonical slots when two are given.
pub fn format_for_synthesis(utterances: &[Utterance], speaker_names: &[String]) -> String {
    let mut display: HashMap<&str, &str> = HashMap::new();
    if speaker_names.len() >= 2 {
        display.insert(SPEAKER_SLOTS[0], &speaker_names[0]);
        display.insert(SPEAKER_SLOTS[1], &speaker_names[1]);
    }

    utterances
        .iter()
        .map(|u| {
            let name = display
                .get(u.speaker.as_str())
                .copied()
                .unwrap_or(u.speaker.as_str());
            format!("{name}：{}", u.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drops every line that does not open with a recognized speaker prefix.
///
/// When `speakers` is still the unmodified default slot pair, the real
/// names are first discovered by scanning for `label：text` lines with
/// non-empty text; at least two distinct discoveries replace the first two
/// slots. An empty result is an error so the caller never sends
/// speaker-less text to synthesis.
pub fn clean_dialogue(raw: &str, speakers: &[String]) -> Result<(String, Vec<String>)> {
    let mut effective: Vec<String> = speakers.to_vec();

    if effective == SPEAKER_SLOTS {
        let mut discovered: Vec<String> = Vec::new();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(caps) = speaker_line().captures(line) {
                let label = caps[1].trim();
                let text = caps[2].trim();
                if !text.is_empty() && !discovered.iter().any(|d| d == label) {
                    discovered.push(label.to_owned());
                }
            }
        }
        if discovered.len() >= 2 {
            effective[0] = discovered[0].clone();
            effective[1] = discovered[1].clone();
        }
    }

    let kept: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| {
            effective.iter().any(|speaker| {
                line.starts_with(&format!("{speaker}：")) || line.starts_with(&format!("{speaker}:"))
            })
        })
        .collect();

    if kept.is_empty() {
        return Err(TtsError::InvalidInput(format!(
            "no dialogue recognized: no line starts with any of {:?}; expected \"{}：text\" lines",
            effective, effective[0]
        )));
    }

    Ok((kept.join("\n"), effective))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterance(speaker: &str, text: &str) -> Utterance {
        Utterance {
            speaker: speaker.to_owned(),
            text: text.to_owned(),
        }
    }

    #[test]
    fn labeled_lines_alternate_slots_in_first_seen_order() {
        let input = "A：第一句\nB：第二句\nA：第三句\nB：第四句";
        let (utterances, original) = parse_plain_text(input);

        assert_eq!(utterances.len(), 4);
        assert_eq!(original, vec!["A", "B"]);
        assert_eq!(
            utterances
                .iter()
                .map(|u| u.speaker.as_str())
                .collect::<Vec<_>>(),
            vec!["Speaker1", "Speaker2", "Speaker1", "Speaker2"]
        );
    }

    #[test]
    fn continuation_lines_attach_to_current_speaker() {
        let input = "客服：您好，請問需要什麼協助？\n我想查詢訂單狀態。\n客服：好的，請提供訂單編號。";
        let (utterances, original) = parse_plain_text(input);

        assert_eq!(
            utterances,
            vec![
                utterance("Speaker1", "您好，請問需要什麼協助？"),
                utterance("Speaker1", "我想查詢訂單狀態。"),
                utterance("Speaker1", "好的，請提供訂單編號。"),
            ]
        );
        assert_eq!(original, vec!["客服"]);
    }

    #[test]
    fn bare_label_line_switches_speaker_without_emitting() {
        let input = "客服：\n您好，很高興為您服務。\n顧客：謝謝。";
        let (utterances, original) = parse_plain_text(input);

        assert_eq!(
            utterances,
            vec![
                utterance("Speaker1", "您好，很高興為您服務。"),
                utterance("Speaker2", "謝謝。"),
            ]
        );
        assert_eq!(original, vec!["客服", "顧客"]);
    }

    #[test]
    fn leading_unlabeled_line_defaults_to_speaker1() {
        let (utterances, original) = parse_plain_text("沒有標記的開場白\nA：你好");
        assert_eq!(utterances[0], utterance("Speaker1", "沒有標記的開場白"));
        assert_eq!(utterances[1], utterance("Speaker1", "你好"));
        assert_eq!(original, vec!["A"]);
    }

    #[test]
    fn more_than_two_labels_collapse_round_robin() {
        let input = "甲：一\n乙：二\n丙：三\n丁：四";
        let (utterances, original) = parse_plain_text(input);
        assert_eq!(original, vec!["甲", "乙", "丙", "丁"]);
        assert_eq!(
            utterances
                .iter()
                .map(|u| u.speaker.as_str())
                .collect::<Vec<_>>(),
            vec!["Speaker1", "Speaker2", "Speaker1", "Speaker2"]
        );
    }

    #[test]
    fn empty_input_yields_no_utterances() {
        let (utterances, original) = parse_plain_text("");
        assert!(utterances.is_empty());
        assert!(original.is_empty());
    }

    #[test]
    fn subtitle_blocks_need_three_lines() {
        let input = "1\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:03,000 --> 00:00:04,000\n第二段文字";
        let utterances = parse_subtitle(input);
        assert_eq!(utterances, vec![utterance("Speaker1", "第二段文字")]);
    }

    #[test]
    fn subtitle_speakers_alternate_and_labels_win() {
        let input = "1\n00:00:01,000 --> 00:00:02,000\n無標記一\n\n2\n00:00:03,000 --> 00:00:04,000\n旁白：有標記\n\n3\n00:00:05,000 --> 00:00:06,000\n無標記二";
        let utterances = parse_subtitle(input);
        assert_eq!(
            utterances,
            vec![
                utterance("Speaker1", "無標記一"),
                utterance("旁白", "有標記"),
                utterance("Speaker2", "無標記二"),
            ]
        );
    }

    #[test]
    fn subtitle_joins_multiple_text_lines_with_space() {
        let input = "1\n00:00:01,000 --> 00:00:02,000\nfirst half\nsecond half";
        let utterances = parse_subtitle(input);
        assert_eq!(utterances[0].text, "first half second half");
    }

    #[test]
    fn subtitle_input_reports_no_original_speakers() {
        let input = "1\n00:00:01,000 --> 00:00:02,000\n旁白：文字";
        let (_, original) = parse(input, SourceKind::Subtitle);
        assert!(original.is_empty());
    }

    #[test]
    fn format_then_reparse_round_trips() {
        let input = "A：你好\nB：嗨\nA：再見";
        let (utterances, original) = parse_plain_text(input);

        let formatted = format_for_synthesis(&utterances, &original);
        assert_eq!(formatted, input);

        let (reparsed, _) = parse_plain_text(&formatted);
        assert_eq!(reparsed, utterances);
    }

    #[test]
    fn clean_discovers_speakers_and_drops_narration() {
        let defaults: Vec<String> = SPEAKER_SLOTS.iter().map(|s| s.to_string()).collect();
        let (cleaned, effective) = clean_dialogue("描述文字\nA：你好\nB：嗨", &defaults).unwrap();
        assert_eq!(cleaned, "A：你好\nB：嗨");
        assert_eq!(effective, vec!["A", "B"]);
    }

    #[test]
    fn clean_drops_speakers_beyond_the_first_two() {
        let defaults: Vec<String> = SPEAKER_SLOTS.iter().map(|s| s.to_string()).collect();
        let raw = "A：你好\nB：嗨\nC：打擾了\nA：再見";
        let (cleaned, effective) = clean_dialogue(raw, &defaults).unwrap();

        // C is discovered but only the first two labels replace the
        // canonical slots, so C's line falls to the filter.
        assert_eq!(effective, vec!["A", "B"]);
        assert_eq!(cleaned, "A：你好\nB：嗨\nA：再見");
    }

    #[test]
    fn clean_keeps_caller_supplied_speakers() {
        let speakers = vec!["主持人".to_owned(), "嘉賓".to_owned()];
        let raw = "主持人：歡迎\n雜訊行\n嘉賓：謝謝";
        let (cleaned, effective) = clean_dialogue(raw, &speakers).unwrap();
        assert_eq!(cleaned, "主持人：歡迎\n嘉賓：謝謝");
        assert_eq!(effective, speakers);
    }

    #[test]
    fn clean_with_nothing_recognized_is_an_error() {
        let defaults: Vec<String> = SPEAKER_SLOTS.iter().map(|s| s.to_string()).collect();
        let err = clean_dialogue("只有旁白\n還是旁白", &defaults).unwrap_err();
        assert!(matches!(err, TtsError::InvalidInput(_)));
    }

    #[test]
    fn source_kind_from_file_name() {
        assert_eq!(SourceKind::from_file_name("a.srt"), SourceKind::Subtitle);
        assert_eq!(SourceKind::from_file_name("a.txt"), SourceKind::PlainText);
    }
}
