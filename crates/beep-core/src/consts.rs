use embedded_graphics::pixelcolor::Rgb565;

pub type ColorType = Rgb565;

pub const WIDTH: u32 = 240;
pub const HEIGHT: u32 = 280;

/// #B82659
pub const APP_RED: ColorType = Rgb565::new(184 >> 3, 38 >> 2, 89 >> 3);
/// #A2F1CA
pub const APP_GREEN: ColorType = Rgb565::new(162 >> 3, 241 >> 2, 202 >> 3);
/// #0A1222
pub const BACKGROUND: ColorType = Rgb565::new(10 >> 3, 18 >> 2, 34 >> 3);

/// Ring diameter as a share of the screen width.
pub const RING_DIAMETER_RATIO: f32 = 0.7;
pub const MAX_RING_DIAMETER: u32 = 500;
