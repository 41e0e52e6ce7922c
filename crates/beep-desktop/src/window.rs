use beep_core::consts;
use beep_core::engine::Engine;
use beep_core::input::InputEvent;
use embedded_graphics::prelude::Size;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};

/// Simulator window showing exactly what the device screen would.
pub struct SimWindow {
    display: SimulatorDisplay<consts::ColorType>,
    window: Window,
}

impl SimWindow {
    pub fn new() -> Self {
        let display =
            SimulatorDisplay::<consts::ColorType>::new(Size::new(consts::WIDTH, consts::HEIGHT));
        let settings = OutputSettingsBuilder::new().scale(2).pixel_spacing(0).build();

        let mut window = Window::new("ominous-beeping", &settings);
        window.update(&display);

        Self { display, window }
    }

    /// Draws the current frame and forwards clicks and key presses to the
    /// engine. Returns `false` once the window has been closed.
    pub fn present(&mut self, engine: &mut Engine) -> anyhow::Result<bool> {
        engine.render(&mut self.display)?;
        self.window.update(&self.display);

        for event in self.window.events() {
            match event {
                SimulatorEvent::Quit => return Ok(false),
                SimulatorEvent::MouseButtonUp { .. } => {
                    engine.input_mut().push(InputEvent::Tap);
                }
                SimulatorEvent::KeyDown {
                    keycode, repeat: false, ..
                } => match keycode {
                    Keycode::S => engine.input_mut().push(InputEvent::Shake),
                    Keycode::Space => engine.input_mut().push(InputEvent::Tap),
                    _ => (),
                },
                _ => (),
            }
        }

        Ok(true)
    }
}
