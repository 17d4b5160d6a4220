//! Packing between canvases and the controller byte layout
//!
//! The controller stores the screen in pages of 8 rows. Each byte covers
//! one column of one page with the top row in bit 0:
//!
//! ```text
//! byte[page * 192 + x]  bit b  <->  pixel (x, page * 8 + b)
//! ```

use core::fmt;
use core::str::FromStr;

use crate::canvas::{framebuffer::find_position, Bitmap, Canvas};
use crate::{Error, FRAME_LEN, HEIGHT, PAGES, WIDTH};

/// A full screen in controller byte order, exactly [`FRAME_LEN`] bytes
#[derive(Clone, PartialEq, Eq)]
pub struct PackedFrame([u8; FRAME_LEN]);

impl PackedFrame {
    /// All-zero frame
    pub const fn new() -> Self {
        PackedFrame([0; FRAME_LEN])
    }

    /// Copy a frame out of a byte slice, which must be exactly
    /// [`FRAME_LEN`] bytes long
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; FRAME_LEN] = bytes.try_into().map_err(|_| Error::ShapeMismatch)?;
        Ok(PackedFrame(bytes))
    }

    /// The raw frame bytes
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// The raw frame bytes, mutably
    pub fn as_mut_bytes(&mut self) -> &mut [u8; FRAME_LEN] {
        &mut self.0
    }

    /// Byte holding rows `page * 8 .. page * 8 + 8` of column `x`
    pub fn byte(&self, page: usize, x: usize) -> Option<u8> {
        if page >= PAGES || x >= WIDTH {
            return None;
        }
        Some(self.0[page * WIDTH + x])
    }
}

impl Default for PackedFrame {
    fn default() -> Self {
        PackedFrame::new()
    }
}

impl AsRef<[u8]> for PackedFrame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; FRAME_LEN]> for PackedFrame {
    fn from(bytes: [u8; FRAME_LEN]) -> Self {
        PackedFrame(bytes)
    }
}

impl fmt::Debug for PackedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lit = self.0.iter().filter(|&&b| b != 0).count();
        f.debug_struct("PackedFrame")
            .field("len", &FRAME_LEN)
            .field("non_zero_bytes", &lit)
            .finish()
    }
}

/// Pack a bitmap into controller byte order.
///
/// Fails with [`Error::ShapeMismatch`] unless the bitmap is exactly
/// `HEIGHT` rows of `WIDTH` columns.
pub fn pack(bitmap: &Bitmap) -> Result<PackedFrame, Error> {
    if !bitmap.has_shape(WIDTH, HEIGHT) {
        return Err(Error::ShapeMismatch);
    }

    let mut packed = PackedFrame::new();
    let bytes = packed.as_mut_bytes();
    for (y, row) in bitmap.rows().iter().enumerate() {
        for (x, &on) in row.iter().enumerate() {
            if on {
                let (index, bit) = find_position(x, y);
                bytes[index] |= bit;
            }
        }
    }
    Ok(packed)
}

/// Expand a packed frame into a panel-sized bitmap
pub fn unpack(frame: &PackedFrame) -> Bitmap {
    let mut bitmap = Bitmap::new();
    for (index, &byte) in frame.as_bytes().iter().enumerate() {
        let (page, x) = (index / WIDTH, index % WIDTH);
        for bit in 0..8 {
            if byte & (1 << bit) != 0 {
                bitmap.set(x as i32, (page * 8 + bit) as i32, true);
            }
        }
    }
    bitmap
}

/// How an overlay pixel combines with the pixel beneath it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CombineMode {
    /// Set where either is set
    #[default]
    Or,
    /// Keep only where both are set
    And,
    /// Toggle where the overlay is set
    Xor,
    /// Take the overlay pixel as is
    Replace,
}

impl CombineMode {
    /// Combine a base pixel with an overlay pixel
    pub const fn apply(self, base: bool, overlay: bool) -> bool {
        match self {
            CombineMode::Or => base | overlay,
            CombineMode::And => base & overlay,
            CombineMode::Xor => base ^ overlay,
            CombineMode::Replace => overlay,
        }
    }

    /// Lowercase name, as accepted by [`FromStr`]
    pub const fn name(self) -> &'static str {
        match self {
            CombineMode::Or => "or",
            CombineMode::And => "and",
            CombineMode::Xor => "xor",
            CombineMode::Replace => "replace",
        }
    }
}

impl FromStr for CombineMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "or" => Ok(CombineMode::Or),
            "and" => Ok(CombineMode::And),
            "xor" => Ok(CombineMode::Xor),
            "replace" => Ok(CombineMode::Replace),
            _ => Err(Error::InvalidMode),
        }
    }
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Combine `overlay` onto a copy of `base` with its top-left corner at
/// `(x, y)`.
///
/// `base` is left untouched. Overlay pixels that land outside the base are
/// dropped.
pub fn overlay<B, O>(base: &B, overlay: &O, x: i32, y: i32, mode: CombineMode) -> B
where
    B: Canvas + Clone,
    O: Canvas + ?Sized,
{
    let mut result = base.clone();
    for row in 0..overlay.height() as i32 {
        for col in 0..overlay.width() as i32 {
            let (tx, ty) = (x.saturating_add(col), y.saturating_add(row));
            if result.contains(tx, ty) {
                let combined = mode.apply(result.get(tx, ty), overlay.get(col, row));
                result.set(tx, ty, combined);
            }
        }
    }
    result
}
