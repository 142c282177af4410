//! Clipped RGB drawing surface.

use std::convert::Infallible;

use embedded_graphics::{
    Pixel,
    pixelcolor::{Rgb888, RgbColor},
    prelude::{DrawTarget, OriginDimensions, Size},
};
use image::{Rgb, RgbImage};

use crate::style::Color;

fn rgb(color: Color) -> Rgb<u8> { Rgb([color.0, color.1, color.2]) }

/// An RGB page image with drawing primitives that clip at the edges.
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    #[must_use]
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, rgb(background)),
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        (x < self.image.width() && y < self.image.height()).then_some((x, y))
    }

    pub fn put(&mut self, x: i32, y: i32, color: Color) {
        if let Some((x, y)) = self.index(x, y) {
            self.image.put_pixel(x, y, rgb(color));
        }
    }

    /// Mix `color` into the pixel at `(x, y)` by `coverage` out of 255.
    pub fn blend(&mut self, x: i32, y: i32, color: Color, coverage: u8) {
        let Some((x, y)) = self.index(x, y) else {
            return;
        };
        if coverage == 0 {
            return;
        }
        let alpha = u16::from(coverage);
        let pixel = self.image.get_pixel_mut(x, y);
        for (channel, target) in pixel.0.iter_mut().zip([color.0, color.1, color.2]) {
            let mixed = (u16::from(target) * alpha + u16::from(*channel) * (255 - alpha)) / 255;
            *channel = u8::try_from(mixed).unwrap_or(u8::MAX);
        }
    }

    /// Fill the rectangle spanning `[x0, x1) × [y0, y1)`.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let max_x = i32::try_from(self.image.width()).unwrap_or(i32::MAX);
        let max_y = i32::try_from(self.image.height()).unwrap_or(i32::MAX);
        for y in y0.max(0)..y1.min(max_y) {
            for x in x0.max(0)..x1.min(max_x) {
                self.put(x, y, color);
            }
        }
    }

    /// One pixel outline of the rectangle spanning `[x0, x1) × [y0, y1)`.
    pub fn stroke_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        self.fill_rect(x0, y0, x1, y0 + 1, color);
        self.fill_rect(x0, y1 - 1, x1, y1, color);
        self.fill_rect(x0, y0, x0 + 1, y1, color);
        self.fill_rect(x1 - 1, y0, x1, y1, color);
    }

    #[must_use]
    pub fn into_image(self) -> RgbImage { self.image }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size { Size::new(self.image.width(), self.image.height()) }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.put(point.x, point.y, Color(color.r(), color.g(), color.b()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(canvas: &Canvas, x: u32, y: u32) -> [u8; 3] { canvas.image.get_pixel(x, y).0 }

    #[test]
    fn fill_is_clipped_to_the_page() {
        let mut canvas = Canvas::new(10, 10, Color::WHITE);
        canvas.fill_rect(-5, -5, 3, 3, Color::BLACK);
        canvas.fill_rect(8, 8, 50, 50, Color::BLACK);
        assert_eq!(at(&canvas, 0, 0), [0, 0, 0]);
        assert_eq!(at(&canvas, 2, 2), [0, 0, 0]);
        assert_eq!(at(&canvas, 3, 3), [255, 255, 255]);
        assert_eq!(at(&canvas, 9, 9), [0, 0, 0]);
    }

    #[test]
    fn stroke_leaves_the_inside_untouched() {
        let mut canvas = Canvas::new(10, 10, Color::WHITE);
        canvas.stroke_rect(1, 1, 9, 9, Color::BLACK);
        assert_eq!(at(&canvas, 1, 5), [0, 0, 0]);
        assert_eq!(at(&canvas, 8, 5), [0, 0, 0]);
        assert_eq!(at(&canvas, 5, 5), [255, 255, 255]);
    }

    #[test]
    fn blend_mixes_by_coverage() {
        let mut canvas = Canvas::new(2, 1, Color::WHITE);
        canvas.blend(0, 0, Color::BLACK, 255);
        canvas.blend(1, 0, Color::BLACK, 0);
        canvas.blend(5, 5, Color::BLACK, 255);
        assert_eq!(at(&canvas, 0, 0), [0, 0, 0]);
        assert_eq!(at(&canvas, 1, 0), [255, 255, 255]);
    }
}
