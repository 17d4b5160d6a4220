//! Rasterization of lines, circles, rounded boxes and text
//!
//! Every algorithm here writes through [`Canvas::set`], so all shapes are
//! clipped pixel by pixel and nothing fails for off-canvas geometry.
//!
//! The stepping rules are kept exactly as the panel's reference drawings
//! expect them, quirks included:
//! - lines are a parametric stepper, not Bresenham, and may leave gaps
//!   at steep angles
//! - filled circles are four mirrored spans per step, which is close to but
//!   not identical with a true scanline disc

use core::f64::consts::{FRAC_PI_2, PI};

use crate::canvas::Canvas;
use crate::text::{self, FontProvider, TextStyle};

/// A line given by start point, direction and length
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    /// Start column
    pub x: i32,
    /// Start row
    pub y: i32,
    /// Direction in degrees, counter-clockwise from +x. With y growing
    /// downward, 0 runs left to right and 270 runs top to bottom.
    pub angle: f64,
    /// Number of steps (pixels) to plot
    pub length: u32,
}

impl Line {
    /// Line from `(x, y)` heading `angle` degrees for `length` steps
    pub const fn new(x: i32, y: i32, angle: f64, length: u32) -> Self {
        Line {
            x,
            y,
            angle,
            length,
        }
    }
}

/// A circle around a center point
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Circle {
    /// Center column
    pub cx: i32,
    /// Center row
    pub cy: i32,
    /// Radius in pixels
    pub radius: i32,
    /// Draw spans instead of the outline
    pub filled: bool,
}

impl Circle {
    /// Outline circle
    pub const fn outline(cx: i32, cy: i32, radius: i32) -> Self {
        Circle {
            cx,
            cy,
            radius,
            filled: false,
        }
    }

    /// Filled circle
    pub const fn filled(cx: i32, cy: i32, radius: i32) -> Self {
        Circle {
            cx,
            cy,
            radius,
            filled: true,
        }
    }
}

/// A box with quarter-circle corners
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundedBox {
    /// Left column
    pub x: i32,
    /// Top row
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
    /// Requested corner radius, clamped to fit the box when drawn
    pub radius: i32,
    /// Fill the interior
    pub fill: bool,
}

impl RoundedBox {
    /// Unfilled box with the smallest corner radius
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        RoundedBox {
            x,
            y,
            width,
            height,
            radius: 0,
            fill: false,
        }
    }

    /// Set the corner radius
    #[must_use]
    pub const fn radius(mut self, radius: i32) -> Self {
        self.radius = radius;
        self
    }

    /// Set whether the interior is filled
    #[must_use]
    pub const fn fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }
}

// Round half to even, the rounding the reference drawings were made with
fn round(v: f64) -> i32 {
    libm::rint(v) as i32
}

fn plot<C: Canvas + ?Sized>(canvas: &mut C, x: i64, y: i64) {
    if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
        canvas.set(x, y, true);
    }
}

// Inclusive run, cut down to the canvas columns before iterating
fn span<C: Canvas + ?Sized>(canvas: &mut C, y: i64, x_start: i64, x_end: i64) {
    let Ok(y) = i32::try_from(y) else {
        return;
    };
    if y < 0 || y as usize >= canvas.height() {
        return;
    }
    let last = (canvas.width() as i64 - 1).min(i64::from(i32::MAX));
    for x in x_start.max(0)..=x_end.min(last) {
        canvas.set(x as i32, y, true);
    }
}

/// Distance from `(cx, cy)` to the nearest and to the farthest pixel of a
/// `width` x `height` canvas
fn distance_range(width: usize, height: usize, cx: i32, cy: i32) -> (f64, f64) {
    let (max_x, max_y) = (width as f64 - 1.0, height as f64 - 1.0);
    let (cx, cy) = (f64::from(cx), f64::from(cy));

    let near_x = cx.clamp(0.0, max_x) - cx;
    let near_y = cy.clamp(0.0, max_y) - cy;
    let far_x = libm::fabs(cx).max(libm::fabs(max_x - cx));
    let far_y = libm::fabs(cy).max(libm::fabs(max_y - cy));

    (
        libm::sqrt(near_x * near_x + near_y * near_y),
        libm::sqrt(far_x * far_x + far_y * far_y),
    )
}

/// Drawing operations available on every [`Canvas`]
pub trait Draw: Canvas {
    /// Set a single pixel
    fn draw_pixel(&mut self, x: i32, y: i32) {
        self.set(x, y, true);
    }

    /// Plot `length` steps from the start point along `angle`
    fn draw_line(&mut self, line: Line) {
        let angle = line.angle * (PI / 180.0);
        let dx = libm::cos(angle);
        // negative because y increases downward
        let dy = -libm::sin(angle);

        for i in 0..line.length {
            let step = f64::from(i);
            let x = round(f64::from(line.x) + dx * step);
            let y = round(f64::from(line.y) + dy * step);
            self.set(x, y, true);
        }
    }

    /// Draw several lines in order
    fn draw_lines(&mut self, lines: &[Line]) {
        for &line in lines {
            self.draw_line(line);
        }
    }

    /// Midpoint circle, as an outline or as spans depending on `circle.filled`
    fn draw_circle(&mut self, circle: Circle) {
        let Circle {
            cx,
            cy,
            radius,
            filled,
        } = circle;
        if self.width() == 0 || self.height() == 0 {
            return;
        }

        // every plotted point is within one pixel of the true circle
        let (near, far) = distance_range(self.width(), self.height(), cx, cy);
        let r = f64::from(radius);
        if r + 1.0 < near {
            return;
        }
        if r - 2.0 > far {
            if filled {
                self.fill(true);
            }
            return;
        }

        let (cx, cy) = (i64::from(cx), i64::from(cy));
        let mut x = i64::from(radius);
        let mut y = 0;
        let mut d = 1 - x;

        while x >= y {
            if filled {
                span(self, cy + y, cx - x, cx + x);
                span(self, cy - y, cx - x, cx + x);
                span(self, cy + x, cx - y, cx + y);
                span(self, cy - x, cx - y, cx + y);
            } else {
                plot(self, cx + x, cy + y);
                plot(self, cx + y, cy + x);
                plot(self, cx - y, cy + x);
                plot(self, cx - x, cy + y);
                plot(self, cx - x, cy - y);
                plot(self, cx - y, cy - x);
                plot(self, cx + y, cy - x);
                plot(self, cx + x, cy - y);
            }

            y += 1;
            if d < 0 {
                d += 2 * y + 1;
            } else {
                x -= 1;
                d += 2 * (y - x) + 1;
            }
        }
    }

    /// Draw several circles in order
    fn draw_circles(&mut self, circles: &[Circle]) {
        for &circle in circles {
            self.draw_circle(circle);
        }
    }

    /// Horizontal run on row `y` from `x_start` to `x_end`, both inclusive
    fn draw_span(&mut self, y: i32, x_start: i32, x_end: i32) {
        span(self, y.into(), x_start.into(), x_end.into());
    }

    /// Box with quarter-circle corners
    ///
    /// The box is first clamped to the canvas, then the radius is clamped to
    /// between 1 and half of the shorter clamped side.
    fn draw_box(&mut self, rect: RoundedBox) {
        // after clamping all corner and edge math stays within the canvas
        let max_x = self.width() as i32 - 1;
        let max_y = self.height() as i32 - 1;
        let clip = |v: i32, max: i32| v.min(max).max(0);

        let x0 = clip(rect.x, max_x);
        let x1 = clip(rect.x.saturating_add(rect.width).saturating_sub(1), max_x);
        let y0 = clip(rect.y, max_y);
        let y1 = clip(rect.y.saturating_add(rect.height).saturating_sub(1), max_y);
        let r = rect.radius.min((x1 - x0) / 2).min((y1 - y0) / 2).max(1);

        // interior without the corner squares
        if rect.fill {
            for yi in (y0 + r)..=(y1 - r) {
                for xi in (x0 + 1)..x1 {
                    self.set(xi, yi, true);
                }
            }
            for yi in (y0 + 1)..(y0 + r) {
                for xi in (x0 + r)..=(x1 - r) {
                    self.set(xi, yi, true);
                }
            }
            for yi in (y1 - r + 1)..y1 {
                for xi in (x0 + r)..=(x1 - r) {
                    self.set(xi, yi, true);
                }
            }
        }

        for xi in (x0 + r)..=(x1 - r) {
            self.set(xi, y0, true);
            self.set(xi, y1, true);
        }

        for yi in (y0 + r)..=(y1 - r) {
            self.set(x0, yi, true);
            self.set(x1, yi, true);
        }

        let steps = r * 2;
        for i in 0..=steps {
            let theta = FRAC_PI_2 * (f64::from(i) / f64::from(steps));
            let dx = round(f64::from(r) * libm::cos(theta));
            let dy = round(f64::from(r) * libm::sin(theta));

            let left = x0 + r - dx;
            let right = x1 - r + dx;
            let top = y0 + r - dy;
            let bottom = y1 - r + dy;

            for px in [left, right] {
                self.set(px, top, true);
                if rect.fill {
                    for fy in (top + 1)..(y0 + r) {
                        self.set(px, fy, true);
                    }
                }

                self.set(px, bottom, true);
                if rect.fill {
                    for fy in (y1 - r + 1)..bottom {
                        self.set(px, fy, true);
                    }
                }
            }
        }
    }

    /// Copy every pixel of `bitmap`, set or clear, onto this canvas with its
    /// top-left corner at `(x, y)`
    fn draw_bitmap<B: Canvas + ?Sized>(&mut self, bitmap: &B, x: i32, y: i32) {
        for row in 0..bitmap.height() as i32 {
            for col in 0..bitmap.width() as i32 {
                self.set(
                    x.saturating_add(col),
                    y.saturating_add(row),
                    bitmap.get(col, row),
                );
            }
        }
    }

    /// Render `text` with its top-left corner at `(x, y)` and return the
    /// cursor position after the last character
    fn draw_text<F: FontProvider + ?Sized>(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        font: &F,
        style: TextStyle,
    ) -> i32 {
        text::draw_text(self, text, x, y, font, style)
    }
}

impl<C: Canvas + ?Sized> Draw for C {}
