use alloc::vec;
use alloc::vec::Vec;

use super::Canvas;
use crate::{HEIGHT, WIDTH};

/// Canvas stored as explicit rows of pixels
///
/// A `Bitmap` is a plain value: clone it before drawing to keep the
/// original. Its shape is not fixed, so it also serves as an overlay
/// sprite or as the result of reading the panel back. Only a full
/// `HEIGHT` x `WIDTH` bitmap can be packed for transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    rows: Vec<Vec<bool>>,
}

impl Default for Bitmap {
    /// Blank bitmap the size of the panel
    fn default() -> Self {
        Bitmap::new()
    }
}

impl Bitmap {
    /// Blank bitmap the size of the panel
    pub fn new() -> Self {
        Bitmap::with_size(WIDTH, HEIGHT)
    }

    /// Blank bitmap of `width` x `height` pixels
    pub fn with_size(width: usize, height: usize) -> Self {
        Bitmap {
            rows: vec![vec![false; width]; height],
        }
    }

    /// Bitmap with every pixel of a `width` x `height` area set
    pub fn filled(width: usize, height: usize) -> Self {
        Bitmap {
            rows: vec![vec![true; width]; height],
        }
    }

    /// Build a bitmap from rows of pixels. Rows are kept exactly as given,
    /// including ragged shapes.
    pub fn from_rows<I, R>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = bool>,
    {
        Bitmap {
            rows: rows.into_iter().map(|r| r.into_iter().collect()).collect(),
        }
    }

    /// Build a bitmap from rows of `0`/`1` values; any non-zero value is set
    pub fn from_bits<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        Bitmap::from_rows(
            rows.iter()
                .map(|r| r.as_ref().iter().map(|&bit| bit != 0).collect::<Vec<_>>()),
        )
    }

    /// The pixel rows
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// Whether every row is `width` pixels and there are `height` rows
    pub fn has_shape(&self, width: usize, height: usize) -> bool {
        self.rows.len() == height && self.rows.iter().all(|r| r.len() == width)
    }

    fn cell(&self, x: i32, y: i32) -> Option<&bool> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        self.rows.get(y)?.get(x)
    }

    fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut bool> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        self.rows.get_mut(y)?.get_mut(x)
    }
}

impl Canvas for Bitmap {
    /// Width of the first row
    fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    fn height(&self) -> usize {
        self.rows.len()
    }

    fn get(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).copied().unwrap_or(false)
    }

    fn set(&mut self, x: i32, y: i32, on: bool) {
        if let Some(pixel) = self.cell_mut(x, y) {
            *pixel = on;
        }
    }

    fn fill(&mut self, on: bool) {
        for row in self.rows.iter_mut() {
            row.fill(on);
        }
    }
}
