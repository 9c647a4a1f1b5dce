//! Bulk voice-preview baker. Run before deployment to fill the
//! pre-generated assets directory so the interactive tools never have to
//! synthesize a preview on first use.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;

use dialogue_tts_gemini::{
    config, prompts, voices, DiskStorage, GeminiClient, PregenerationStatus, PreviewManager,
    TtsModel,
};

#[derive(Debug, Parser)]
#[command(about = "批量生成所有語音預覽檔案", version)]
struct Cli {
    /// Gemini API key (defaults to the GEMINI_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,

    /// TTS model
    #[arg(long, value_enum)]
    model: Option<TtsModel>,

    /// Languages to generate, comma separated
    #[arg(long, value_delimiter = ',')]
    languages: Vec<String>,

    /// Voices to generate, comma separated (defaults to the full catalog)
    #[arg(long, value_delimiter = ',')]
    voices: Vec<String>,

    /// Directory the preview files are written to
    #[arg(long, default_value = "voice_previews")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    let api_key = match config::resolve_api_key(args.api_key) {
        Ok(key) => key,
        Err(_) => {
            eprintln!("❌ 未提供 API 金鑰");
            eprintln!("💡 請使用 --api-key 參數或設定 GEMINI_API_KEY 環境變數");
            std::process::exit(1);
        }
    };
    let model = config::resolve_model(args.model);

    let languages: Vec<String> = if args.languages.is_empty() {
        prompts::PREVIEW_LANGUAGES.iter().map(|l| l.to_string()).collect()
    } else {
        args.languages
    };
    let voice_set: Vec<String> = if args.voices.is_empty() {
        voices::voice_names().map(str::to_owned).collect()
    } else {
        for v in &args.voices {
            if !voices::is_voice(v) {
                eprintln!("❌ 未知的語音：{v}");
                std::process::exit(1);
            }
        }
        args.voices
    };

    std::fs::create_dir_all(&args.output_dir)?;

    let client = GeminiClient::new(api_key, model);
    // Both cache directories point at the output directory: the baker
    // fills the pre-generated assets dir directly.
    let manager = PreviewManager::new(
        Arc::new(client),
        Arc::new(DiskStorage),
        args.output_dir.clone(),
        args.output_dir.clone(),
    );

    println!("開始生成語音預覽檔案...");
    println!("語音數量：{}", voice_set.len());
    println!("語言數量：{}", languages.len());
    println!("總共需要生成：{} 個檔案", voice_set.len() * languages.len());
    println!("{}", "-".repeat(50));

    let start = Instant::now();
    let mut totals = PregenerationStatus::default();

    for language in &languages {
        let task = manager.pregenerate_all(voice_set.clone(), language.clone());

        while !task.is_finished() {
            tokio::time::sleep(Duration::from_secs(2)).await;
            let progress = manager.progress(&voice_set, language);
            log::info!(
                "{language}: {}/{} ({}%)",
                progress.completed,
                progress.total,
                progress.percentage()
            );
        }

        let status = task.wait().await;
        totals.generated += status.generated;
        totals.skipped += status.skipped;
        totals.failed += status.failed;
    }

    println!("{}", "-".repeat(50));
    println!("生成完成！");
    println!("總耗時：{:.1} 秒", start.elapsed().as_secs_f64());
    println!("成功生成：{} 個檔案", totals.generated);
    println!("跳過（已存在）：{} 個檔案", totals.skipped);
    println!("生成失敗：{} 個檔案", totals.failed);
    println!("預覽檔案儲存在：{}", args.output_dir.display());

    Ok(())
}
