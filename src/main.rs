use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, ValueEnum};

use dialogue_tts_gemini::{
    audio, config, dialogue, prompts, template::DialogueTemplate, template::TEMPLATE_FILE, voices,
    AudioEncoding, DiskStorage, GeminiClient, PreviewManager, PromptType, SourceKind, TtsModel,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    Single,
    Multi,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Wav,
    Pcm,
}

fn parse_sample_rate(s: &str) -> Result<u32, String> {
    match s {
        "24000" => Ok(24_000),
        "16000" => Ok(16_000),
        "8000" => Ok(8_000),
        _ => Err("sample rate must be 24000, 16000 or 8000".to_owned()),
    }
}

fn parse_channels(s: &str) -> Result<u16, String> {
    match s {
        "1" => Ok(1),
        "2" => Ok(2),
        _ => Err("channels must be 1 or 2".to_owned()),
    }
}

/// Gemini TTS 命令列工具
#[derive(Debug, Parser)]
#[command(about = "Gemini TTS 命令列工具", long_about = None, version)]
struct Cli {
    /// Gemini API key (defaults to the GEMINI_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,

    /// TTS model (defaults to GEMINI_TTS_MODEL, then the flash model)
    #[arg(long, value_enum)]
    model: Option<TtsModel>,

    /// Synthesis mode
    #[arg(long, value_enum, default_value_t = Mode::Single)]
    mode: Mode,

    /// Output file
    #[arg(long, short, default_value = "output.wav")]
    output: PathBuf,

    /// Text to synthesize (single mode)
    #[arg(long, short)]
    text: Option<String>,

    /// Preset prompt type (single mode)
    #[arg(long, value_enum)]
    prompt_type: Option<PromptType>,

    /// Style modifier, e.g. 興奮的 or 平靜的
    #[arg(long)]
    style: Option<String>,

    /// Voice name (defaults to GEMINI_DEFAULT_VOICE, then Kore)
    #[arg(long, short)]
    voice: Option<String>,

    /// Dialogue template JSON path (multi mode)
    #[arg(long, short)]
    dialogue: Option<PathBuf>,

    /// Parse an .srt or plain-text transcript and synthesize it (multi mode)
    #[arg(long)]
    from_file: Option<PathBuf>,

    /// Comma-separated voice pair for --from-file
    #[arg(long, default_value = "Kore,Puck")]
    voices: String,

    /// Comma-separated per-speaker styles (multi mode)
    #[arg(long)]
    styles: Option<String>,

    /// Write a blank dialogue template and exit
    #[arg(long)]
    create_dialogue_template: bool,

    /// List available voices and exit
    #[arg(long)]
    list_voices: bool,

    /// Preview language (defaults to GEMINI_DEFAULT_LANGUAGE, then zh-TW)
    #[arg(long)]
    language: Option<String>,

    /// Print the cached-or-generated preview path for --voice/--language
    #[arg(long)]
    preview: bool,

    /// Print an environment diagnostic and exit
    #[arg(long)]
    check_env: bool,

    /// Output sample rate
    #[arg(long, default_value = "24000", value_parser = parse_sample_rate)]
    sample_rate: u32,

    /// Output channel count
    #[arg(long, default_value = "1", value_parser = parse_channels)]
    channels: u16,

    /// Output container
    #[arg(long, value_enum, default_value_t = OutputFormat::Wav)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    if args.list_voices {
        println!("可用語音選項：");
        for (i, (name, desc)) in voices::VOICES.iter().enumerate() {
            println!("{:2}. {name} - {desc}", i + 1);
        }
        return Ok(());
    }

    if args.check_env {
        println!("{}", config::env_report());
        return Ok(());
    }

    if args.create_dialogue_template {
        DialogueTemplate::sample().write(Path::new(TEMPLATE_FILE))?;
        println!("✅ 對話範本已建立：{TEMPLATE_FILE}");
        return Ok(());
    }

    let api_key = match config::resolve_api_key(args.api_key.clone()) {
        Ok(key) => key,
        Err(_) => {
            eprintln!("❌ 未提供 API 金鑰");
            eprintln!("💡 請使用 --api-key 參數或設定 GEMINI_API_KEY 環境變數");
            eprintln!("   範例：export GEMINI_API_KEY=your_api_key_here");
            std::process::exit(1);
        }
    };

    let model = config::resolve_model(args.model);

    let voice = args
        .voice
        .clone()
        .or_else(|| config::env_default(config::DEFAULT_VOICE_ENV))
        .unwrap_or_else(|| voices::DEFAULT_VOICE.to_owned());
    if !voices::is_voice(&voice) {
        eprintln!("❌ 未知的語音：{voice}");
        eprintln!("💡 使用 --list-voices 查看可用語音");
        std::process::exit(1);
    }

    let language = args
        .language
        .clone()
        .or_else(|| config::env_default(config::DEFAULT_LANGUAGE_ENV))
        .unwrap_or_else(|| voices::DEFAULT_LANGUAGE.to_owned());
    if !voices::is_language(&language) {
        eprintln!("❌ 不支援的語言代碼：{language}");
        std::process::exit(1);
    }

    let client = GeminiClient::new(api_key, model);

    if args.preview {
        let manager = PreviewManager::new(
            Arc::new(client),
            Arc::new(DiskStorage),
            dialogue_tts_gemini::preview::PREVIEW_DIR,
            ".",
        );
        let path = manager.get_or_generate(&voice, &language).await?;
        println!("{}", path.display());
        return Ok(());
    }

    let pcm = match args.mode {
        Mode::Single => synthesize_single(&client, &args, &voice).await?,
        Mode::Multi => synthesize_multi(&client, &args).await?,
    };

    let encoding = AudioEncoding {
        channels: args.channels,
        sample_rate: args.sample_rate,
    };
    match args.format {
        OutputFormat::Wav => audio::write_wav(&args.output, &pcm, &encoding)?,
        OutputFormat::Pcm => audio::write_pcm(&args.output, &pcm)?,
    }
    println!("✅ 語音已儲存至：{}", args.output.display());

    Ok(())
}

async fn synthesize_single(
    client: &GeminiClient,
    args: &Cli,
    voice: &str,
) -> anyhow::Result<Vec<u8>> {
    let text = if let Some(kind) = args.prompt_type {
        let prompt = prompts::preset_prompt(kind);
        match &args.style {
            Some(style) => prompts::apply_style(prompt, style),
            None => prompt.to_owned(),
        }
    } else if let Some(text) = &args.text {
        match &args.style {
            Some(style) => prompts::styled_text(text, style),
            None => text.clone(),
        }
    } else {
        eprintln!("❌ 請提供 --text 參數或使用 --prompt-type");
        std::process::exit(1);
    };

    log::info!("使用語音 {voice} 生成單一講者語音...");
    Ok(client.synthesize_single(&text, voice).await?)
}

async fn synthesize_multi(client: &GeminiClient, args: &Cli) -> anyhow::Result<Vec<u8>> {
    let (content, pairs) = if let Some(path) = &args.from_file {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let raw = std::fs::read_to_string(path)?;
        let kind = SourceKind::from_file_name(&file_name);
        let (utterances, original_speakers) = dialogue::parse(&raw, kind);

        // Display names: discovered labels first, canonical slots as filler.
        let mut names: Vec<String> = original_speakers.iter().take(2).cloned().collect();
        for slot in dialogue::SPEAKER_SLOTS.iter().skip(names.len()) {
            names.push(slot.to_string());
        }

        let formatted = dialogue::format_for_synthesis(&utterances, &names);
        let (cleaned, effective) = dialogue::clean_dialogue(&formatted, &names)?;

        let voice_pair: Vec<String> = args.voices.split(',').map(|v| v.trim().to_owned()).collect();
        if voice_pair.len() != 2 {
            eprintln!("❌ --voices 需要兩個以逗號分隔的語音名稱，例如 Kore,Puck");
            std::process::exit(1);
        }
        for v in &voice_pair {
            if !voices::is_voice(v) {
                eprintln!("❌ 未知的語音：{v}");
                std::process::exit(1);
            }
        }

        let pairs: Vec<(String, String)> = effective
            .iter()
            .cloned()
            .zip(voice_pair.into_iter())
            .collect();
        (cleaned, pairs)
    } else if let Some(path) = &args.dialogue {
        let template = DialogueTemplate::load(path)?;
        let pairs = template.speaker_pairs();
        (template.content, pairs)
    } else {
        eprintln!("❌ 多講者模式需要提供 --dialogue 或 --from-file 參數");
        eprintln!("💡 提示：使用 --create-dialogue-template 建立範本");
        std::process::exit(1);
    };

    let styles: Vec<Option<String>> = match &args.styles {
        Some(raw) => raw
            .split(',')
            .map(|s| {
                let s = s.trim();
                if s.is_empty() || s == "無" {
                    None
                } else {
                    Some(s.to_owned())
                }
            })
            .collect(),
        None => Vec::new(),
    };
    let speaker_styles: Vec<(&str, Option<&str>)> = pairs
        .iter()
        .enumerate()
        .map(|(i, (name, _))| (name.as_str(), styles.get(i).and_then(|s| s.as_deref())))
        .collect();
    let prompt = prompts::multi_speaker_prompt(&content, &speaker_styles);

    log::info!(
        "生成多講者對話，講者：{:?}",
        pairs.iter().map(|(name, _)| name).collect::<Vec<_>>()
    );
    Ok(client.synthesize_multi(&prompt, &pairs).await?)
}
