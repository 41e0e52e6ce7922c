use embedded_graphics::{
    Drawable,
    mono_font::{
        MonoTextStyle,
        ascii::{FONT_6X10, FONT_9X15_BOLD},
    },
    prelude::{DrawTarget, Point, Primitive, Size},
    primitives::{PrimitiveStyleBuilder, Rectangle},
    text::{Alignment, Text},
};

use crate::consts::{self, ColorType};

pub const TITLE: &str = "Shake it!";
pub const MESSAGE: &str = "To start the beeping,\nshake your device.";
pub const DISMISS_LABEL: &str = "OK";

const BOX_SIZE: Size = Size::new(200, 96);

/// The "Shake it!" hint. Shown at most once until dismissed.
#[derive(Debug, Default)]
pub struct Alert {
    visible: bool,
}

impl Alert {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        if !self.visible {
            log::info!("showing shake hint");
        }
        self.visible = true;
    }

    /// Returns whether the hint was on screen.
    pub fn dismiss(&mut self) -> bool {
        core::mem::replace(&mut self.visible, false)
    }
}

impl Drawable for Alert {
    type Color = ColorType;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        if !self.visible {
            return Ok(());
        }

        let center_x = consts::WIDTH as i32 / 2;
        let top_left = Point::new(
            center_x - BOX_SIZE.width as i32 / 2,
            (consts::HEIGHT - BOX_SIZE.height) as i32 / 2,
        );

        let box_style = PrimitiveStyleBuilder::new()
            .fill_color(consts::BACKGROUND)
            .stroke_color(consts::APP_GREEN)
            .stroke_width(2)
            .build();
        Rectangle::new(top_left, BOX_SIZE)
            .into_styled(box_style)
            .draw(target)?;

        let title_style = MonoTextStyle::new(&FONT_9X15_BOLD, consts::APP_GREEN);
        let body_style = MonoTextStyle::new(&FONT_6X10, consts::APP_GREEN);
        let button_style = MonoTextStyle::new(&FONT_9X15_BOLD, consts::APP_RED);

        Text::with_alignment(
            TITLE,
            Point::new(center_x, top_left.y + 22),
            title_style,
            Alignment::Center,
        )
        .draw(target)?;

        Text::with_alignment(
            MESSAGE,
            Point::new(center_x, top_left.y + 44),
            body_style,
            Alignment::Center,
        )
        .draw(target)?;

        Text::with_alignment(
            DISMISS_LABEL,
            Point::new(center_x, top_left.y + BOX_SIZE.height as i32 - 12),
            button_style,
            Alignment::Center,
        )
        .draw(target)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden() {
        assert!(!Alert::new().is_visible());
    }

    #[test]
    fn dismiss_reports_whether_it_was_shown() {
        let mut alert = Alert::new();
        assert!(!alert.dismiss());

        alert.show();
        alert.show();
        assert!(alert.is_visible());
        assert!(alert.dismiss());
        assert!(!alert.is_visible());
        assert!(!alert.dismiss());
    }
}
