//! `embedded-graphics` support for both canvases
//!
//! `BinaryColor::On` sets a pixel and `BinaryColor::Off` clears it. Pixels
//! outside the canvas are dropped.
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::canvas::{Bitmap, Canvas, FrameBuffer};
use crate::transport::DisplayError;

fn draw_pixels<C, I>(canvas: &mut C, pixels: I)
where
    C: Canvas + ?Sized,
    I: IntoIterator<Item = Pixel<BinaryColor>>,
{
    for Pixel(point, color) in pixels {
        canvas.set(point.x, point.y, color.is_on());
    }
}

fn canvas_size<C: Canvas + ?Sized>(canvas: &C) -> Size {
    Size::new(canvas.width() as u32, canvas.height() as u32)
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = DisplayError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        draw_pixels(self, pixels);
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.is_on());
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        canvas_size(self)
    }
}

impl DrawTarget for Bitmap {
    type Color = BinaryColor;
    type Error = DisplayError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        draw_pixels(self, pixels);
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.is_on());
        Ok(())
    }
}

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size {
        canvas_size(self)
    }
}
