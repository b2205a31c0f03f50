use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use hound::{SampleFormat, WavSpec, WavWriter};

use crate::config::Config;
use crate::provider::{ContentProvider, SpeechClip};

/// Plays a phrase through the provider's voice, or the local synthesizer
/// when that fails. Never reports failure to the caller.
pub struct SpeechPlayer {
    provider: Arc<dyn ContentProvider>,
    audio_player: Vec<String>,
    speech_command: Vec<String>,
    clip_dir: PathBuf,
}

impl SpeechPlayer {
    pub fn new(provider: Arc<dyn ContentProvider>, config: &Config) -> Self {
        let clip_dir = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("vocabcard");
        Self {
            provider,
            audio_player: config.audio_player.clone(),
            speech_command: config.speech_command.clone(),
            clip_dir,
        }
    }

    pub fn speak(&self, phrase: &str) {
        match self.play_generated(phrase) {
            Ok(()) => tracing::debug!(phrase, "played generated speech"),
            Err(e) => {
                tracing::warn!(phrase, error = %e, "generated speech failed, using fallback synthesizer");
                if let Err(e) = run_command(&self.speech_command, phrase) {
                    tracing::warn!(phrase, error = %e, "fallback synthesizer failed");
                }
            }
        }
    }

    fn play_generated(&self, phrase: &str) -> Result<()> {
        let clip = self.provider.synthesize_speech(phrase)?;
        std::fs::create_dir_all(&self.clip_dir)?;
        // One file per request: concurrent requests must not share a clip.
        // The file is removed when `file` drops, after the player exits.
        let file = tempfile::Builder::new()
            .prefix("speech-")
            .suffix(".wav")
            .tempfile_in(&self.clip_dir)
            .with_context(|| format!("creating clip in {}", self.clip_dir.display()))?;
        write_wav(file.path(), &clip)?;
        let path = file.path().to_string_lossy();
        run_command(&self.audio_player, &path)
    }
}

pub fn write_wav(path: &Path, clip: &SpeechClip) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let spec = WavSpec {
        channels: 1,
        sample_rate: clip.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("creating {}", path.display()))?;
    for &sample in &clip.samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Runs `argv` with `last_arg` appended and waits for it. Output is discarded
/// so nothing leaks into the TUI.
fn run_command(argv: &[String], last_arg: &str) -> Result<()> {
    let Some((program, args)) = argv.split_first() else {
        bail!("no command configured");
    };
    let status = Command::new(program)
        .args(args)
        .arg(last_arg)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("spawning {program}"))?;
    if !status.success() {
        bail!("{program} exited with {status}");
    }
    Ok(())
}
