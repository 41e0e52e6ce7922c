use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context as _;
use beep_core::config::{
    DEFAULT_BASE_INTERVAL, DEFAULT_CONFUSION_TAPS, DEFAULT_DOUBLE_TIME_THRESHOLD,
    DEFAULT_RING_COUNT,
};
use beep_core::engine::Engine;
use beep_core::gfx::RingGeometry;
use beep_core::input::InputEvent;
use beep_core::motion::ShakeDetector;
use beep_core::{BeepConfig, TimeSource};
use clap::Parser;
use log::LevelFilter;

use crate::buzzer::{BeepSound, DesktopBuzzer};
use crate::clock::StdTimeSource;
use crate::mock_hw_tui::{MockHwTui, PanelEvent, ViewSnapshot};

mod buzzer;
mod clock;
mod mock_hw_tui;
#[cfg(feature = "window")]
mod window;

const FRAME_TIME: Duration = Duration::from_millis(10);

/// Shake to start the ominous beeping, tap to stop it.
#[derive(Parser, Debug)]
#[command(name = "ominous-beeping")]
#[command(about = "Ominous beeping gadget on a mock hardware panel")]
struct Args {
    /// Audio clip played for each beep (WAV, OGG, MP3 or FLAC). A synthesized tone is used without it
    #[arg(long)]
    clip: Option<PathBuf>,

    /// Frequency of the synthesized beep
    #[arg(long, default_value_t = 880)]
    tone_hz: u32,

    /// Length of the synthesized beep
    #[arg(long, default_value_t = 120)]
    tone_ms: u32,

    /// Number of rings around the core
    #[arg(long, default_value_t = DEFAULT_RING_COUNT)]
    rings: usize,

    /// Sequencer tick period
    #[arg(long, default_value_t = DEFAULT_BASE_INTERVAL.as_millis() as u64)]
    interval_ms: u64,

    /// Beeping doubles in rate at tick 1 + 2 * threshold
    #[arg(long, default_value_t = DEFAULT_DOUBLE_TIME_THRESHOLD)]
    threshold: u32,

    /// Idle taps before the "Shake it!" hint
    #[arg(long, default_value_t = DEFAULT_CONFUSION_TAPS)]
    confusion_taps: u8,

    /// Most verbose log level shown in the panel
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Also show the device screen in a simulator window
    #[cfg(feature = "window")]
    #[arg(long)]
    window: bool,
}

impl Args {
    fn beep_config(&self) -> BeepConfig {
        BeepConfig {
            base_interval: Duration::from_millis(self.interval_ms),
            double_time_threshold: self.threshold,
            ring_count: self.rings,
            confusion_taps: self.confusion_taps,
        }
    }

    fn sound(&self) -> BeepSound {
        match &self.clip {
            Some(path) => BeepSound::Clip(path.clone()),
            None => BeepSound::Tone {
                frequency_hz: self.tone_hz,
                duration_ms: self.tone_ms,
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.beep_config();
    config.validate().context("invalid beep configuration")?;

    let tui = MockHwTui::new(RingGeometry::for_screen(config.ring_count), args.log_level)?;
    let buzzer = DesktopBuzzer::new(args.sound());
    let mut engine = Engine::new(&buzzer, &config).context("failed to build the engine")?;

    let clock = StdTimeSource::new();
    let mut shake_detector = ShakeDetector::default();

    #[cfg(feature = "window")]
    let mut window = args.window.then(window::SimWindow::new);

    log::info!(
        "ready: {} rings, {}ms ticks, double time at tick {}",
        config.ring_count,
        config.base_interval.as_millis(),
        config.double_time_tick()
    );

    'running: loop {
        for event in tui.events() {
            match event {
                PanelEvent::Tap => engine.input_mut().push(InputEvent::Tap),
                PanelEvent::ShowLayers => engine.scene_mut().rings_mut().show_layers(),
                PanelEvent::Quit => break 'running,
            }
        }

        if let Some(event) = shake_detector.sample(tui.accelerometer()) {
            engine.input_mut().push(event);
        }

        engine.update(clock.now());

        #[cfg(feature = "window")]
        if let Some(window) = window.as_mut() {
            if !window.present(&mut engine)? {
                break 'running;
            }
        }

        tui.publish(ViewSnapshot::capture(&engine));
        thread::sleep(FRAME_TIME);
    }

    Ok(())
}
