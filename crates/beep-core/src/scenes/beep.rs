use core::time::Duration;

use embedded_graphics::{
    Drawable as _,
    mono_font::{MonoTextStyle, ascii::FONT_9X15_BOLD},
    prelude::{DrawTarget, Point},
    text::{Alignment, Text},
};

use crate::{
    config::BeepConfig,
    confusion::ConfusionCounter,
    consts,
    engine::Context,
    error::ConfigError,
    gfx::{RingGeometry, RingsView},
    input::InputEvent,
    output::Output,
    rings::RingAnimator,
    scenes::{Scene, alert::Alert},
    sequencer::BeepSequencer,
    time::Instant,
};

const TITLE: &str = "OMINOUS\nBEEPING\nAPP";
const TITLE_BASELINE_Y: i32 = 238;

/// The whole gadget: rings on top, title underneath, hint on top of both.
pub struct BeepScene {
    sequencer: BeepSequencer,
    rings: RingAnimator,
    confusion: ConfusionCounter,
    alert: Alert,
    geometry: RingGeometry,
    animation_speed: Duration,
}

impl BeepScene {
    pub fn new(config: &BeepConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            sequencer: BeepSequencer::new(config),
            rings: RingAnimator::new(config.ring_count)?,
            confusion: ConfusionCounter::new(config.confusion_taps),
            alert: Alert::new(),
            geometry: RingGeometry::for_screen(config.ring_count),
            animation_speed: config.animation_speed(),
        })
    }

    pub fn sequencer(&self) -> &BeepSequencer {
        &self.sequencer
    }

    pub fn rings(&self) -> &RingAnimator {
        &self.rings
    }

    pub fn rings_mut(&mut self) -> &mut RingAnimator {
        &mut self.rings
    }

    pub fn confusion(&self) -> &ConfusionCounter {
        &self.confusion
    }

    pub fn alert(&self) -> &Alert {
        &self.alert
    }

    fn run_due_ticks(&mut self, output: &mut Output<'_>, now: Instant) {
        while let Some(tick) = self.sequencer.poll(now) {
            if !tick.beep {
                continue;
            }
            // settle the previous pulse at the tick's own time so a slow
            // frame doesn't swallow this one
            self.rings.update(tick.at);
            output.beep();
            self.rings.trigger(tick.at, self.animation_speed);
        }
    }

    fn on_shake(&mut self, now: Instant) {
        self.alert.dismiss();
        self.confusion.reset();
        self.sequencer.start(now);
    }

    fn on_tap(&mut self) {
        // the hint is modal: a tap is its OK button
        if self.alert.dismiss() {
            log::debug!("shake hint dismissed");
            return;
        }

        if self.sequencer.stop() {
            self.confusion.reset();
        } else if self.confusion.record_idle_tap() {
            self.alert.show();
        }
    }
}

impl Scene for BeepScene {
    fn update(&mut self, ctx: &mut Context) {
        let now = ctx.now;

        // ticks due by now happened before input stamped with this frame
        self.run_due_ticks(&mut ctx.output, now);

        if !ctx.input.is_empty() {
            log::trace!("handling {} input events", ctx.input.len());
        }
        while let Some(event) = ctx.input.pop() {
            match event {
                InputEvent::Shake => self.on_shake(now),
                InputEvent::Tap => self.on_tap(),
            }
        }

        self.rings.update(now);
    }

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = consts::ColorType>,
    {
        target.clear(consts::BACKGROUND)?;

        RingsView::new(&self.geometry, self.rings.opacities()).draw(target)?;

        Text::with_alignment(
            TITLE,
            Point::new(consts::WIDTH as i32 / 2, TITLE_BASELINE_Y),
            MonoTextStyle::new(&FONT_9X15_BOLD, consts::APP_GREEN),
            Alignment::Center,
        )
        .draw(target)?;

        self.alert.draw(target)?;

        Ok(())
    }
}
