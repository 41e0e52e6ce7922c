use embedded_graphics::{
    Drawable,
    prelude::{DrawTarget, Point, Primitive},
    primitives::{Circle, PrimitiveStyle, PrimitiveStyleBuilder},
};

use crate::consts::{self, ColorType};

/// Sizes of the core and rings for a given overall diameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    center: Point,
    ring_width: f32,
    ring_count: usize,
}

impl RingGeometry {
    pub fn new(center: Point, diameter: u32, ring_count: usize) -> Self {
        let diameter = diameter.min(consts::MAX_RING_DIAMETER);
        Self {
            center,
            ring_width: diameter as f32 / (ring_count + 4) as f32,
            ring_count,
        }
    }

    /// Geometry used on the device screen.
    pub fn for_screen(ring_count: usize) -> Self {
        let diameter = (consts::WIDTH as f32 * consts::RING_DIAMETER_RATIO) as u32;
        Self::new(
            Point::new(consts::WIDTH as i32 / 2, consts::WIDTH as i32 / 2 - 5),
            diameter,
            ring_count,
        )
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn ring_count(&self) -> usize {
        self.ring_count
    }

    pub fn ring_width(&self) -> f32 {
        self.ring_width
    }

    pub fn core_radius(&self) -> f32 {
        self.ring_width * 1.26
    }

    /// Radius of ring `n`, counting from 1 for the innermost ring.
    pub fn ring_radius(&self, n: usize) -> f32 {
        self.ring_width * (1 + n) as f32
    }

    pub fn stroke_width(&self) -> f32 {
        self.ring_width * 0.6
    }

    /// Radius of layer `index`, where layer 0 is the core.
    pub fn layer_radius(&self, index: usize) -> f32 {
        if index == 0 {
            self.core_radius()
        } else {
            self.ring_radius(index)
        }
    }
}

fn px(value: f32) -> u32 {
    (value + 0.5) as u32
}

/// The core and rings, drawing only the shapes that are lit.
pub struct RingsView<'a> {
    geometry: &'a RingGeometry,
    opacities: &'a [f32],
    color: ColorType,
}

impl<'a> RingsView<'a> {
    pub fn new(geometry: &'a RingGeometry, opacities: &'a [f32]) -> Self {
        Self {
            geometry,
            opacities,
            color: consts::APP_RED,
        }
    }
}

impl Drawable for RingsView<'_> {
    type Color = ColorType;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let ring_style = PrimitiveStyleBuilder::new()
            .stroke_color(self.color)
            .stroke_width(px(self.geometry.stroke_width()))
            .build();

        for (index, opacity) in self.opacities.iter().enumerate() {
            // shapes are either fully lit or not there at all
            if *opacity <= 0.0 {
                continue;
            }

            let diameter = 2 * px(self.geometry.layer_radius(index));
            let circle = Circle::with_center(self.geometry.center(), diameter);
            if index == 0 {
                circle
                    .into_styled(PrimitiveStyle::with_fill(self.color))
                    .draw(target)?;
            } else {
                circle.into_styled(ring_style).draw(target)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;

    fn small_geometry() -> RingGeometry {
        // ring width = 40 / 7
        RingGeometry::new(Point::new(32, 32), 40, 3)
    }

    #[test]
    fn geometry_follows_ring_width() {
        let geometry = RingGeometry::new(Point::zero(), 168, 3);
        assert_eq!(geometry.ring_width(), 24.0);
        assert_eq!(geometry.ring_radius(1), 48.0);
        assert_eq!(geometry.ring_radius(3), 96.0);
        assert!((geometry.core_radius() - 30.24).abs() < 0.001);
        assert!((geometry.stroke_width() - 14.4).abs() < 0.001);
    }

    #[test]
    fn diameter_is_capped() {
        let capped = RingGeometry::new(Point::zero(), 900, 3);
        let max = RingGeometry::new(Point::zero(), consts::MAX_RING_DIAMETER, 3);
        assert_eq!(capped, max);
    }

    #[test]
    fn screen_geometry_fits_the_width() {
        let geometry = RingGeometry::for_screen(3);
        let outer = geometry.ring_radius(3) + geometry.stroke_width() / 2.0;
        assert!(outer * 2.0 <= consts::WIDTH as f32);
    }

    #[test]
    fn hidden_shapes_draw_nothing() {
        let geometry = small_geometry();
        let mut display = MockDisplay::<ColorType>::new();
        RingsView::new(&geometry, &[0.0; 4]).draw(&mut display).unwrap();
        assert_eq!(display, MockDisplay::new());
    }

    #[test]
    fn core_is_filled() {
        let geometry = small_geometry();
        let mut display = MockDisplay::<ColorType>::new();
        RingsView::new(&geometry, &[1.0, 0.0, 0.0, 0.0])
            .draw(&mut display)
            .unwrap();
        assert_eq!(display.get_pixel(Point::new(32, 32)), Some(consts::APP_RED));
        assert_eq!(display.get_pixel(Point::new(54, 32)), None);
    }

    #[test]
    fn outer_ring_is_hollow() {
        let geometry = small_geometry();
        let mut display = MockDisplay::<ColorType>::new();
        RingsView::new(&geometry, &[0.0, 0.0, 0.0, 1.0])
            .draw(&mut display)
            .unwrap();
        assert_eq!(display.get_pixel(Point::new(32, 32)), None);
        assert_eq!(display.get_pixel(Point::new(54, 32)), Some(consts::APP_RED));
    }
}
