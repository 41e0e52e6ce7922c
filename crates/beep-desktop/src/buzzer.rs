use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;
use std::time::Duration;

use anyhow::Context as _;
use beep_core::buzzer::Buzzer;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Source};

const SAMPLE_RATE: u32 = 48000;
const AMPLITUDE: f32 = 0.15;

// Square wave generator
struct SquareWave {
    frequency: f32,
    sample_rate: u32,
    num_samples: usize,
    current_sample: usize,
}

impl SquareWave {
    fn new(frequency: f32, sample_rate: u32) -> Self {
        Self {
            frequency,
            sample_rate,
            num_samples: 0,
            current_sample: 0,
        }
    }

    fn take_duration(mut self, duration: Duration) -> Self {
        self.num_samples = (duration.as_secs_f32() * self.sample_rate as f32) as usize;
        self
    }
}

impl Iterator for SquareWave {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.num_samples > 0 && self.current_sample >= self.num_samples {
            return None;
        }

        let sample_position = self.current_sample as f32 / self.sample_rate as f32;
        let cycle_position = (sample_position * self.frequency) % 1.0;

        self.current_sample += 1;

        // high for the first half of the cycle, low for the second
        if cycle_position < 0.5 {
            Some(AMPLITUDE)
        } else {
            Some(-AMPLITUDE)
        }
    }
}

impl Source for SquareWave {
    fn current_frame_len(&self) -> Option<usize> {
        if self.num_samples > 0 {
            Some(self.num_samples - self.current_sample)
        } else {
            None
        }
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        if self.num_samples > 0 {
            Some(Duration::from_secs_f32(
                self.num_samples as f32 / self.sample_rate as f32,
            ))
        } else {
            None
        }
    }
}

/// What a beep sounds like.
#[derive(Debug, Clone)]
pub enum BeepSound {
    /// Synthesized square wave, like a piezo buzzer.
    Tone { frequency_hz: u32, duration_ms: u32 },
    /// Audio file decoded with rodio.
    Clip(PathBuf),
}

/// A sound that has been checked and is ready to play.
#[derive(Clone)]
enum LoadedSound {
    Tone { frequency_hz: u32, duration_ms: u32 },
    Clip(Arc<[u8]>),
}

impl LoadedSound {
    fn load(sound: BeepSound) -> anyhow::Result<Self> {
        match sound {
            BeepSound::Tone {
                frequency_hz,
                duration_ms,
            } => Ok(LoadedSound::Tone {
                frequency_hz,
                duration_ms,
            }),
            BeepSound::Clip(path) => load_clip(&path).map(LoadedSound::Clip),
        }
    }
}

fn load_clip(path: &Path) -> anyhow::Result<Arc<[u8]>> {
    let bytes: Arc<[u8]> = fs::read(path)
        .with_context(|| format!("reading beep clip {}", path.display()))?
        .into();

    // decode once up front so a broken file is reported at startup
    Decoder::new(Cursor::new(Arc::clone(&bytes)))
        .with_context(|| format!("decoding beep clip {}", path.display()))?;

    Ok(bytes)
}

pub enum BuzzerCommand {
    Beep,
}

pub struct DesktopBuzzer {
    // None when the sound couldn't be loaded: beeps are skipped
    command_tx: Option<Sender<BuzzerCommand>>,
}

impl DesktopBuzzer {
    pub fn new(sound: BeepSound) -> Self {
        let sound = match LoadedSound::load(sound) {
            Ok(sound) => sound,
            Err(e) => {
                log::warn!("beep sound unavailable, beeping silently: {:#}", e);
                return Self { command_tx: None };
            }
        };

        let (tx, rx) = channel::<BuzzerCommand>();

        // Spawn a thread to handle audio playback
        thread::spawn(move || {
            buzzer_thread(rx, sound);
        });

        Self {
            command_tx: Some(tx),
        }
    }
}

impl Buzzer for DesktopBuzzer {
    fn beep(&self) {
        let Some(tx) = &self.command_tx else {
            log::trace!("no beep sound loaded, skipping");
            return;
        };
        // ignore errors if the audio thread is gone
        let _ = tx.send(BuzzerCommand::Beep);
    }
}

fn buzzer_thread(rx: Receiver<BuzzerCommand>, sound: LoadedSound) {
    // Initialize audio output once for the thread
    let (_stream, stream_handle) = match OutputStream::try_default() {
        Ok(output) => output,
        Err(e) => {
            log::error!("failed to open audio output: {}", e);
            return;
        }
    };

    while let Ok(BuzzerCommand::Beep) = rx.recv() {
        if let Err(e) = play_beep(&stream_handle, &sound) {
            log::warn!("failed to play beep: {:#}", e);
        }
    }
}

fn play_beep(stream_handle: &OutputStreamHandle, sound: &LoadedSound) -> anyhow::Result<()> {
    match sound {
        LoadedSound::Tone {
            frequency_hz,
            duration_ms,
        } => {
            let source = SquareWave::new(*frequency_hz as f32, SAMPLE_RATE)
                .take_duration(Duration::from_millis(*duration_ms as u64));
            stream_handle.play_raw(source.convert_samples())?;
        }
        LoadedSound::Clip(bytes) => {
            let source = Decoder::new(Cursor::new(Arc::clone(bytes)))?;
            stream_handle.play_raw(source.convert_samples())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_wave_has_requested_length() {
        let wave = SquareWave::new(440.0, 1000).take_duration(Duration::from_millis(250));
        assert_eq!(wave.total_duration(), Some(Duration::from_millis(250)));
        assert_eq!(wave.count(), 250);
    }

    #[test]
    fn square_wave_alternates() {
        // 128Hz at 1024Hz sampling: 4 high samples then 4 low
        let samples: Vec<f32> = SquareWave::new(128.0, 1024).take(8).collect();
        assert!(samples[..4].iter().all(|s| *s == AMPLITUDE));
        assert!(samples[4..].iter().all(|s| *s == -AMPLITUDE));
    }

    #[test]
    fn missing_clip_goes_silent() {
        let buzzer = DesktopBuzzer::new(BeepSound::Clip(PathBuf::from(
            "/definitely/not/here/beep.wav",
        )));
        assert!(buzzer.command_tx.is_none());
        // must not panic
        buzzer.beep();
    }

    #[test]
    fn undecodable_clip_is_rejected() {
        let path = std::env::temp_dir().join("beep-desktop-not-audio.wav");
        fs::write(&path, b"this is not audio").unwrap();
        let result = load_clip(&path);
        let _ = fs::remove_file(&path);
        assert!(result.is_err());
    }
}
