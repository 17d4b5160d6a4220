//! Pixel surfaces for drawing

/// Grid-backed canvas of rows and columns
pub mod bitmap;
/// Canvas backed by the packed controller byte layout
pub mod framebuffer;

pub use bitmap::Bitmap;
pub use framebuffer::FrameBuffer;

/// Common contract for every monochrome drawing surface
///
/// Coordinates are signed so that shapes may extend past any edge. Writes
/// outside `[0, width) x [0, height)` are dropped and reads there return
/// `false`; neither is an error.
///
/// Canvases are single-writer: nothing here synchronizes concurrent access.
pub trait Canvas {
    /// Width in pixels
    fn width(&self) -> usize;

    /// Height in pixels
    fn height(&self) -> usize;

    /// Read the pixel at `(x, y)`
    fn get(&self, x: i32, y: i32) -> bool;

    /// Write the pixel at `(x, y)`, ignoring positions outside the canvas
    fn set(&mut self, x: i32, y: i32, on: bool);

    /// Whether `(x, y)` lies on the canvas
    fn contains(&self, x: i32, y: i32) -> bool {
        !outside_canvas(x, y, self.width(), self.height())
    }

    /// Set every pixel to `on`
    fn fill(&mut self, on: bool) {
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                self.set(x, y, on);
            }
        }
    }
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn get(&self, x: i32, y: i32) -> bool {
        (**self).get(x, y)
    }

    fn set(&mut self, x: i32, y: i32, on: bool) {
        (**self).set(x, y, on);
    }

    fn fill(&mut self, on: bool) {
        (**self).fill(on);
    }
}

// Checks if a pos is outside a canvas of the given size
fn outside_canvas(x: i32, y: i32, width: usize, height: usize) -> bool {
    x < 0 || y < 0 || x as usize >= width || y as usize >= height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HEIGHT, WIDTH};

    // Minimal canvas that only relies on the provided trait methods.
    struct DummyCanvas {
        pixels: [[bool; 4]; 3],
    }

    impl Canvas for DummyCanvas {
        fn width(&self) -> usize {
            4
        }

        fn height(&self) -> usize {
            3
        }

        fn get(&self, x: i32, y: i32) -> bool {
            self.contains(x, y) && self.pixels[y as usize][x as usize]
        }

        fn set(&mut self, x: i32, y: i32, on: bool) {
            if self.contains(x, y) {
                self.pixels[y as usize][x as usize] = on;
            }
        }
    }

    #[test]
    fn contains_respects_all_edges() {
        let canvas = DummyCanvas {
            pixels: [[false; 4]; 3],
        };
        assert!(canvas.contains(0, 0));
        assert!(canvas.contains(3, 2));
        assert!(!canvas.contains(-1, 0));
        assert!(!canvas.contains(0, -1));
        assert!(!canvas.contains(4, 0));
        assert!(!canvas.contains(0, 3));
    }

    #[test]
    fn default_fill_covers_whole_canvas() {
        let mut canvas = DummyCanvas {
            pixels: [[false; 4]; 3],
        };
        canvas.fill(true);
        assert!(canvas.pixels.iter().flatten().all(|&p| p));
        canvas.fill(false);
        assert!(canvas.pixels.iter().flatten().all(|&p| !p));
    }

    #[test]
    fn mutable_reference_forwards_to_canvas() {
        fn paint<C: Canvas>(mut canvas: C) -> usize {
            canvas.set(1, 2, true);
            canvas.width()
        }

        let mut canvas = DummyCanvas {
            pixels: [[false; 4]; 3],
        };
        assert_eq!(paint(&mut canvas), 4);
        assert!(canvas.get(1, 2));
    }

    #[test]
    fn both_backings_agree_on_set_and_get() {
        let mut bitmap = Bitmap::new();
        let mut frame = FrameBuffer::new();
        assert_eq!((bitmap.width(), bitmap.height()), (WIDTH, HEIGHT));
        assert_eq!((frame.width(), frame.height()), (WIDTH, HEIGHT));

        for &(x, y) in &[(0, 0), (191, 63), (64, 8), (127, 31), (5, 62)] {
            for &on in &[true, false, true] {
                bitmap.set(x, y, on);
                frame.set(x, y, on);
                assert_eq!(bitmap.get(x, y), on);
                assert_eq!(frame.get(x, y), on);
            }
        }
    }

    #[test]
    fn out_of_range_writes_are_dropped() {
        let mut bitmap = Bitmap::new();
        let mut frame = FrameBuffer::new();
        for &(x, y) in &[(-1, 0), (0, -1), (192, 0), (0, 64), (i32::MAX, i32::MIN)] {
            bitmap.set(x, y, true);
            frame.set(x, y, true);
            assert!(!bitmap.get(x, y));
            assert!(!frame.get(x, y));
        }
        assert_eq!(bitmap, Bitmap::new());
        assert!(frame.frame().as_bytes().iter().all(|&b| b == 0));
    }
}
