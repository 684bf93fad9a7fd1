//! Drawing surface used by the processors.
//!
//! Processors only need lines, filled circles and text, so they draw through
//! the [`Canvas`] trait. Video frames (`opencv::core::Mat`) implement it with
//! `imgproc`; tests can implement it with a simple recorder.

use crate::{landmarks::PixelPoint, Result};
use opencv::{
    core::{Mat, Point, Scalar},
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8, LINE_AA},
    prelude::*,
};
use serde::{Deserialize, Serialize};

/// BGR color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Color {
    #[must_use]
    pub const fn bgr(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }
}

impl From<[u8; 3]> for Color {
    fn from([b, g, r]: [u8; 3]) -> Self {
        Self { b, g, r }
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        [c.b, c.g, c.r]
    }
}

impl From<Color> for Scalar {
    fn from(c: Color) -> Self {
        Scalar::new(f64::from(c.b), f64::from(c.g), f64::from(c.r), 0.0)
    }
}

/// Font settings for a text label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub font_scale: f64,
    pub thickness: i32,
}

/// Minimal drawing capability
pub trait Canvas {
    /// Frame `(width, height)` in pixels
    fn size(&self) -> (i32, i32);

    /// Draw a line segment
    fn line(&mut self, from: PixelPoint, to: PixelPoint, color: Color, thickness: i32) -> Result<()>;

    /// Draw a filled circle
    fn filled_circle(&mut self, center: PixelPoint, radius: i32, color: Color) -> Result<()>;

    /// Draw text with its baseline starting at `origin`
    fn text(&mut self, text: &str, origin: PixelPoint, style: &TextStyle) -> Result<()>;

    /// Rendered `(width, height)` of `text` in pixels
    fn text_size(&self, text: &str, style: &TextStyle) -> Result<(i32, i32)>;
}

impl Canvas for Mat {
    fn size(&self) -> (i32, i32) {
        (self.cols(), self.rows())
    }

    fn line(&mut self, from: PixelPoint, to: PixelPoint, color: Color, thickness: i32) -> Result<()> {
        imgproc::line(self, from.into(), to.into(), color.into(), thickness, LINE_8, 0)?;
        Ok(())
    }

    fn filled_circle(&mut self, center: PixelPoint, radius: i32, color: Color) -> Result<()> {
        imgproc::circle(self, center.into(), radius, color.into(), -1, LINE_8, 0)?;
        Ok(())
    }

    fn text(&mut self, text: &str, origin: PixelPoint, style: &TextStyle) -> Result<()> {
        imgproc::put_text(
            self,
            text,
            Point::from(origin),
            FONT_HERSHEY_SIMPLEX,
            style.font_scale,
            style.color.into(),
            style.thickness,
            LINE_AA,
            false,
        )?;
        Ok(())
    }

    fn text_size(&self, text: &str, style: &TextStyle) -> Result<(i32, i32)> {
        let mut baseline = 0;
        let size = imgproc::get_text_size(text, FONT_HERSHEY_SIMPLEX, style.font_scale, style.thickness, &mut baseline)?;
        Ok((size.width, size.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Vec3b, CV_8UC3};

    fn blank(width: i32, height: i32) -> Mat {
        Mat::zeros(height, width, CV_8UC3).unwrap().to_mat().unwrap()
    }

    #[test]
    fn test_color_serde_as_triplet() {
        let color: Color = serde_yaml::from_str("[0, 255, 10]").unwrap();
        assert_eq!(color, Color::bgr(0, 255, 10));
        assert_eq!(serde_yaml::to_string(&color).unwrap().trim(), "- 0\n- 255\n- 10");
    }

    #[test]
    fn test_mat_size() {
        let frame = blank(64, 48);
        assert_eq!(Canvas::size(&frame), (64, 48));
    }

    #[test]
    fn test_mat_filled_circle_paints_center() {
        let mut frame = blank(40, 40);
        frame.filled_circle(PixelPoint::new(20, 20), 5, Color::bgr(0, 0, 255)).unwrap();

        let px = frame.at_2d::<Vec3b>(20, 20).unwrap();
        assert_eq!((px[0], px[1], px[2]), (0, 0, 255));
    }

    #[test]
    fn test_mat_text_size_grows_with_scale() {
        let frame = blank(10, 10);
        let white = Color::bgr(255, 255, 255);
        let small = frame
            .text_size("Rep: 1", &TextStyle { color: white, font_scale: 0.5, thickness: 1 })
            .unwrap();
        let large = frame
            .text_size("Rep: 1", &TextStyle { color: white, font_scale: 1.5, thickness: 2 })
            .unwrap();
        assert!(large.1 > small.1);
        assert!(large.0 > small.0);
    }
}
