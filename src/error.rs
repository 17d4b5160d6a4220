use display_interface::DisplayError;
use thiserror::Error;

use crate::{FRAME_LEN, HEIGHT, WIDTH};

/// Errors reported by the codec and the driver.
///
/// Drawing never fails: geometry that falls outside a canvas is clipped.
#[derive(Debug, Error, Clone)]
pub enum Error {
    /// A bitmap was not `HEIGHT` rows of `WIDTH` columns, or a packed
    /// buffer was not `FRAME_LEN` bytes long
    #[error("expected {} rows of {} columns ({} packed bytes)", HEIGHT, WIDTH, FRAME_LEN)]
    ShapeMismatch,
    /// An overlay combine mode name was not one of `or`, `and`, `xor`, `replace`
    #[error("unknown combine mode")]
    InvalidMode,
    /// The transport failed to complete a bus operation
    #[error("display interface error: {0:?}")]
    Interface(DisplayError),
}

impl From<DisplayError> for Error {
    fn from(err: DisplayError) -> Self {
        Error::Interface(err)
    }
}

// `DisplayError` has no `PartialEq`; interface errors compare by variant.
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Error::ShapeMismatch, Error::ShapeMismatch) => true,
            (Error::InvalidMode, Error::InvalidMode) => true,
            (Error::Interface(a), Error::Interface(b)) => {
                core::mem::discriminant(a) == core::mem::discriminant(b)
            }
            _ => false,
        }
    }
}

impl Eq for Error {}
