//! embedded-graphics display surface for `gridtext-render` jobs.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

use embedded_graphics::{
    mono_font::{ascii::FONT_4X6, MonoFont, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    text::{Baseline, Text},
};
use gridtext::DisplayMetrics;
use gridtext_render::{DisplaySurface, Rgb};

/// A draw target with a device push cycle.
///
/// Drawing mutates a local framebuffer; [`push`](Self::push) transfers the
/// framebuffer to the physical output.
pub trait PushTarget: DrawTarget<Color = Rgb888> {
    /// Transfer the framebuffer to the physical output.
    fn push(&mut self) -> Result<(), Self::Error>;
}

/// Convert a scheduler color into an embedded-graphics color.
pub const fn rgb_to_rgb888(color: Rgb) -> Rgb888 {
    Rgb888::new(color.r, color.g, color.b)
}

/// Mono-font [`DisplaySurface`] over any [`PushTarget`].
///
/// Text is drawn with a fixed-cell [`MonoFont`]; the default `FONT_4X6`
/// suits 64-pixel matrices at a 6px line advance.
pub struct MonoSurface<D> {
    target: D,
    font: &'static MonoFont<'static>,
}

impl<D: PushTarget> MonoSurface<D> {
    /// Wrap a push target with the default font.
    pub fn new(target: D) -> Self {
        Self {
            target,
            font: &FONT_4X6,
        }
    }

    /// Use a specific mono font.
    pub fn with_font(mut self, font: &'static MonoFont<'static>) -> Self {
        self.font = font;
        self
    }

    /// Display metrics for this target/font pairing.
    ///
    /// Screen size comes from the target's physical resolution, cell
    /// geometry from the font.
    pub fn metrics(&self) -> DisplayMetrics {
        let size = self.target.bounding_box().size;
        DisplayMetrics {
            screen_width: size.width as i32,
            screen_height: size.height as i32,
            line_height: self.font.character_size.height as i32,
            char_width: self.font.character_size.width as i32,
            char_spacing: self.font.character_spacing as i32,
            left_margin: 1,
            top_margin: 1,
        }
    }

    /// Borrow the wrapped target.
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Unwrap the target.
    pub fn into_target(self) -> D {
        self.target
    }
}

impl<D: PushTarget> DisplaySurface for MonoSurface<D> {
    type Error = D::Error;

    fn clear(&mut self, color: Rgb) -> Result<(), Self::Error> {
        self.target.clear(rgb_to_rgb888(color))
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Rgb) -> Result<(), Self::Error> {
        let style = MonoTextStyle::new(self.font, rgb_to_rgb888(color));
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(&mut self.target)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        log::trace!("pushing framebuffer");
        self.target.push()
    }
}

/// In-memory framebuffer push target.
///
/// [`push`](PushTarget::push) snapshots the live pixels, so tests and
/// previews can observe exactly what a device would have shown after each
/// flush.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatrixBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb888>,
    pushed: Vec<Rgb888>,
    pushes: usize,
}

impl MatrixBuffer {
    /// Allocate a black framebuffer.
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![Rgb888::BLACK; len],
            pushed: vec![Rgb888::BLACK; len],
            pushes: 0,
        }
    }

    /// Live (unpushed) pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        self.index(x, y).map(|index| self.pixels[index])
    }

    /// Pixel at `(x, y)` as of the latest push.
    pub fn pushed_pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        self.index(x, y).map(|index| self.pushed[index])
    }

    /// Number of pushes performed.
    pub fn push_count(&self) -> usize {
        self.pushes
    }

    /// Number of pushed pixels that are not black.
    pub fn lit_pushed_pixels(&self) -> usize {
        self.pushed
            .iter()
            .filter(|color| **color != Rgb888::BLACK)
            .count()
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize) * (self.width as usize) + (x as usize))
    }
}

impl OriginDimensions for MatrixBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for MatrixBuffer {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            if let Some(index) = self.index(point.x as u32, point.y as u32) {
                self.pixels[index] = color;
            }
        }
        Ok(())
    }
}

impl PushTarget for MatrixBuffer {
    fn push(&mut self) -> Result<(), Self::Error> {
        self.pushed.copy_from_slice(&self.pixels);
        self.pushes += 1;
        Ok(())
    }
}
