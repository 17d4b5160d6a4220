//! LM19264 LCD Graphics Driver
//!
//! Used in the [Topway LM19264](https://www.topwaydisplay.com/) 192x64 monochrome
//! graphic LCD module, which is built from three 64-column controller chips
//! sharing one 8-bit parallel bus.
//!
//! ## Architecture
//!
//! This driver separates drawing from hardware transfer:
//! - **Canvases** (`Bitmap`, `FrameBuffer`) hold pixels and implement the [`Canvas`] trait
//! - **Drawing** ([`Draw`]) rasterizes lines, circles, rounded boxes and text onto any canvas
//! - **Codec** ([`codec`]) packs a canvas into the controller's page-major byte layout
//! - **Driver** ([`Lm19264`]) walks a packed frame in region/page/column order and
//!   hands every register select and data byte to a [`Transport`]
//!
//! A transport is anything that can select a chip region and write command
//! or data bytes. [`interface::ParallelInterface`] is one built from
//! `embedded-hal` output pins.
//!
//! ## Usage
//!
//! ```rust, ignore
//! use lm19264::prelude::*;
//! use lm19264::interface::ParallelInterface;
//!
//! // 1. Create the transport and the driver
//! let mut interface = ParallelInterface::new(data_pins, rs, rw, e, csa, csb, rstb);
//! interface.init_pins()?;
//! interface.hard_reset(&mut delay)?;
//! let mut lcd = Lm19264::new(interface);
//! lcd.init()?;
//!
//! // 2. Draw into an in-place frame buffer
//! let mut frame = FrameBuffer::new();
//! frame.draw_box(RoundedBox::new(0, 0, 192, 64).radius(6));
//! frame.draw_circle(Circle::filled(96, 32, 12));
//!
//! // 3. Send it to the panel
//! lcd.flush(&frame)?;
//! ```
//!
//! The grid-backed [`Bitmap`] supports the same drawing calls and is packed
//! with [`codec::pack`] before transfer:
//!
//! ```rust, ignore
//! let mut bitmap = Bitmap::new();
//! bitmap.draw_line(Line::new(0, 63, 45.0, 64));
//! lcd.write_frame(&codec::pack(&bitmap)?)?;
//! ```
//!
//! Canvases are single-writer values without internal locking; share one
//! across threads only behind external synchronization.
//!
#![no_std]
#![deny(missing_docs)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

extern crate alloc;

pub mod canvas;
mod cmd;
pub mod codec;
pub mod draw;
pub mod driver;
mod error;
mod flag;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod interface;
pub mod region;
pub mod text;
pub mod transport;

pub use canvas::{Bitmap, Canvas, FrameBuffer};
pub use codec::PackedFrame;
pub use draw::Draw;
pub use driver::Lm19264;
pub use error::Error;
pub use transport::Transport;

/// Panel width in pixels
pub const WIDTH: usize = 192;

/// Panel height in pixels
pub const HEIGHT: usize = 64;

/// Number of 8-row pages
pub const PAGES: usize = HEIGHT / 8;

/// Number of controller chips (regions) across the panel
pub const REGIONS: usize = 3;

/// Columns driven by a single region
pub const REGION_WIDTH: usize = WIDTH / REGIONS;

/// Length of a packed frame in bytes
pub const FRAME_LEN: usize = WIDTH * PAGES;

/// Useful exports
pub mod prelude {
    pub use crate::canvas::{Bitmap, Canvas, FrameBuffer};
    pub use crate::codec::{CombineMode, PackedFrame};
    pub use crate::draw::{Circle, Draw, Line, RoundedBox};
    pub use crate::driver::Lm19264;
    pub use crate::region::Region;
    pub use crate::text::{FontProvider, Glyph, TextStyle};
    pub use crate::transport::{ReadTransport, Transport};
    pub use crate::Error;
}
