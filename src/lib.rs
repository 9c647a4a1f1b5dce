pub mod audio;
pub mod client;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod preview;
pub mod prompts;
pub mod template;
pub mod types;
pub mod voices;

pub use audio::{AudioEncoding, DiskStorage, Storage};
pub use client::{GeminiClient, TtsModel};
pub use dialogue::{SourceKind, Utterance, SPEAKER_SLOTS};
pub use error::{Result, TtsError};
pub use preview::{
    GenerationProgress, PregenerationStatus, PregenerationTask, PreviewManager, Synthesizer,
};
pub use prompts::PromptType;
pub use template::DialogueTemplate;
