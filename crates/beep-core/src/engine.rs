use embedded_graphics::prelude::DrawTarget;

use crate::{
    buzzer::Buzzer,
    config::BeepConfig,
    consts,
    error::ConfigError,
    input::Input,
    output::Output,
    scenes::{Scene as _, beep::BeepScene},
    time::Instant,
};

pub struct Engine<'a> {
    scene: BeepScene,
    context: Context<'a>,
}

impl<'a> Engine<'a> {
    pub fn new(buzzer: &'a dyn Buzzer, config: &BeepConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            scene: BeepScene::new(config)?,
            context: Context::new(buzzer),
        })
    }

    pub fn render<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = consts::ColorType>,
    {
        self.scene.draw(target)
    }

    /// Runs one frame: handles queued input, then everything that fell due
    /// by `now`. Time must not go backwards between calls.
    pub fn update(&mut self, now: Instant) {
        self.context.now = now;
        self.scene.update(&mut self.context);
    }

    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.context.input
    }

    pub fn scene(&self) -> &BeepScene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut BeepScene {
        &mut self.scene
    }

    pub fn beep_count(&self) -> u32 {
        self.context.output.beep_count()
    }
}

pub struct Context<'a> {
    pub input: Input,
    pub output: Output<'a>,
    pub now: Instant,
}

impl<'a> Context<'a> {
    fn new(buzzer: &'a dyn Buzzer) -> Self {
        Self {
            input: Input::new(),
            output: Output::new(buzzer),
            now: Instant::ZERO,
        }
    }
}
