//! Voice preview caching and bulk pre-generation.
//!
//! Lookup order for a `(voice, language)` pair: the in-memory cache
//! (scoped to the active language), the pre-generated assets directory,
//! the flat working-directory cache, and finally the synthesizer. A file
//! on durable storage is the sole source of truth for "already
//! generated"; the in-memory map is a rebuildable secondary cache, so
//! progress reporting and the bulk run's skip check go straight to the
//! filesystem.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::audio::{AudioEncoding, Storage};
use crate::error::Result;

/// Default pre-generated assets directory.
pub const PREVIEW_DIR: &str = "voice_previews";

/// Rate-limit delay between consecutive synthesis calls in a bulk run.
const INTER_CALL_DELAY: Duration = Duration::from_millis(500);

/// Deterministic cache file name. Must stay stable: existing caches are
/// keyed by it.
pub fn preview_file_name(voice: &str, language: &str) -> String {
    format!("preview_{voice}_{language}.wav")
}

/// Preview synthesis seam. The production implementation is
/// [`crate::GeminiClient`]; tests substitute fakes.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize_preview(&self, voice: &str, language: &str) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationProgress {
    pub total: usize,
    pub completed: usize,
}

impl GenerationProgress {
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (self.completed * 100 / self.total) as u32
        }
    }
}

#[derive(Default)]
struct MemoryCache {
    language: String,
    entries: HashMap<(String, String), PathBuf>,
}

/// Owned by the calling application layer; no global state. Cloning is
/// cheap and shares the same in-memory cache.
#[derive(Clone)]
pub struct PreviewManager {
    synthesizer: Arc<dyn Synthesizer>,
    storage: Arc<dyn Storage>,
    preview_dir: PathBuf,
    cache_dir: PathBuf,
    memory: Arc<Mutex<MemoryCache>>,
}

impl PreviewManager {
    pub fn new(
        synthesizer: Arc<dyn Synthesizer>,
        storage: Arc<dyn Storage>,
        preview_dir: impl Into<PathBuf>,
        cache_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            synthesizer,
            storage,
            preview_dir: preview_dir.into(),
            cache_dir: cache_dir.into(),
            memory: Arc::new(Mutex::new(MemoryCache::default())),
        }
    }

    /// Returns the cached preview path for `(voice, language)`, generating
    /// and persisting it when no cache level has it. A failed synthesis
    /// leaves no cache entry behind, so the next call retries.
    pub async fn get_or_generate(&self, voice: &str, language: &str) -> Result<PathBuf> {
        {
            let mut mem = self.memory.lock();
            if mem.language != language {
                // Language switch invalidates the whole map, not parts of it.
                mem.language = language.to_owned();
                mem.entries.clear();
            } else if let Some(path) = mem.entries.get(&(voice.to_owned(), language.to_owned())) {
                return Ok(path.clone());
            }
        }

        let name = preview_file_name(voice, language);

        let pregenerated = self.preview_dir.join(&name);
        if self.storage.exists(&pregenerated) {
            self.remember(voice, language, &pregenerated);
            return Ok(pregenerated);
        }

        let cached = self.cache_dir.join(&name);
        if self.storage.exists(&cached) {
            self.remember(voice, language, &cached);
            return Ok(cached);
        }

        log::info!("generating voice preview for {voice} ({language})");
        let pcm = self.synthesizer.synthesize_preview(voice, language).await?;
        self.storage.persist(&cached, &pcm, &AudioEncoding::default())?;
        self.remember(voice, language, &cached);
        Ok(cached)
    }

    /// Counts previews already on durable storage. Deliberately ignores
    /// the in-memory cache so the number survives process restarts.
    pub fn progress<S: AsRef<str>>(&self, voices: &[S], language: &str) -> GenerationProgress {
        let completed = voices
            .iter()
            .filter(|voice| {
                let path = self.cache_dir.join(preview_file_name(voice.as_ref(), language));
                self.storage.exists(&path)
            })
            .count();
        GenerationProgress {
            total: voices.len(),
            completed,
        }
    }

    /// Spawns a detached bulk run over `voices` in the given order.
    /// Existing files are skipped; individual failures are logged and the
    /// run continues. The returned handle can be polled, cancelled or
    /// awaited; nothing in the shipped binaries ever cancels it.
    pub fn pregenerate_all(&self, voices: Vec<String>, language: String) -> PregenerationTask {
        let cancel = Arc::new(AtomicBool::new(false));
        let generated = Arc::new(AtomicUsize::new(0));
        let skipped = Arc::new(AtomicUsize::new(0));
        let failed = Arc::new(AtomicUsize::new(0));

        let manager = self.clone();
        let task_cancel = cancel.clone();
        let task_generated = generated.clone();
        let task_skipped = skipped.clone();
        let task_failed = failed.clone();

        let handle = tokio::spawn(async move {
            for voice in voices {
                if task_cancel.load(Ordering::Relaxed) {
                    log::info!("preview pre-generation for {language} cancelled");
                    break;
                }

                let path = manager.cache_dir.join(preview_file_name(&voice, &language));
                if manager.storage.exists(&path) {
                    task_skipped.fetch_add(1, Ordering::Relaxed);
                    continue;
                }

                match manager.synthesizer.synthesize_preview(&voice, &language).await {
                    Ok(pcm) => {
                        match manager
                            .storage
                            .persist(&path, &pcm, &AudioEncoding::default())
                        {
                            Ok(()) => {
                                manager.remember(&voice, &language, &path);
                                task_generated.fetch_add(1, Ordering::Relaxed);
                            }
                            Err(e) => {
                                task_failed.fetch_add(1, Ordering::Relaxed);
                                log::warn!("failed to persist preview for {voice} ({language}): {e}");
                            }
                        }
                    }
                    Err(e) => {
                        task_failed.fetch_add(1, Ordering::Relaxed);
                        log::warn!("preview generation failed for {voice} ({language}): {e}");
                    }
                }

                // Applies after every synthesis attempt, not after skips.
                tokio::time::sleep(INTER_CALL_DELAY).await;
            }
        });

        PregenerationTask {
            cancel,
            generated,
            skipped,
            failed,
            handle,
        }
    }

    /// Populates the in-memory cache, but only while `language` is still
    /// the active scope; a concurrent rescope wins.
    fn remember(&self, voice: &str, language: &str, path: &Path) {
        let mut mem = self.memory.lock();
        if mem.language == language {
            mem.entries
                .insert((voice.to_owned(), language.to_owned()), path.to_owned());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PregenerationStatus {
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl PregenerationStatus {
    pub fn processed(&self) -> usize {
        self.generated + self.skipped + self.failed
    }
}

/// Handle to a detached bulk run.
pub struct PregenerationTask {
    cancel: Arc<AtomicBool>,
    generated: Arc<AtomicUsize>,
    skipped: Arc<AtomicUsize>,
    failed: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl PregenerationTask {
    pub fn snapshot(&self) -> PregenerationStatus {
        PregenerationStatus {
            generated: self.generated.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }

    /// Requests a stop before the next voice. Already-running synthesis
    /// calls are not interrupted.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the run to finish and returns the final counters.
    pub async fn wait(self) -> PregenerationStatus {
        let PregenerationTask {
            generated,
            skipped,
            failed,
            handle,
            ..
        } = self;
        let _ = handle.await;
        PregenerationStatus {
            generated: generated.load(Ordering::Relaxed),
            skipped: skipped.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
        }
    }
}
