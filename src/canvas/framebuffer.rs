use super::{outside_canvas, Canvas};
use crate::codec::PackedFrame;
use crate::{HEIGHT, WIDTH};

/// Canvas that draws straight into the packed controller layout
///
/// Pixels live in a [`PackedFrame`], so the buffer can be sent to the panel
/// without a packing pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameBuffer {
    frame: PackedFrame,
}

impl FrameBuffer {
    /// Blank frame buffer
    pub fn new() -> Self {
        FrameBuffer {
            frame: PackedFrame::new(),
        }
    }

    /// Wrap an already packed frame
    pub fn from_frame(frame: PackedFrame) -> Self {
        FrameBuffer { frame }
    }

    /// The packed frame, ready for transfer
    pub fn frame(&self) -> &PackedFrame {
        &self.frame
    }

    /// Returns the buffer
    pub fn buffer(&self) -> &[u8] {
        self.frame.as_bytes()
    }

    /// Returns a mutable buffer
    pub fn get_mut_buffer(&mut self) -> &mut [u8] {
        self.frame.as_mut_bytes()
    }

    /// Consume the frame buffer and return its packed frame
    pub fn into_frame(self) -> PackedFrame {
        self.frame
    }
}

impl Canvas for FrameBuffer {
    fn width(&self) -> usize {
        WIDTH
    }

    fn height(&self) -> usize {
        HEIGHT
    }

    fn get(&self, x: i32, y: i32) -> bool {
        if outside_canvas(x, y, WIDTH, HEIGHT) {
            return false;
        }
        let (index, bit) = find_position(x as usize, y as usize);
        self.buffer()[index] & bit != 0
    }

    fn set(&mut self, x: i32, y: i32, on: bool) {
        if outside_canvas(x, y, WIDTH, HEIGHT) {
            return;
        }

        // Give us index inside the buffer and the bit-position in that u8 which needs to be changed
        let (index, bit) = find_position(x as usize, y as usize);
        let buffer = self.get_mut_buffer();
        if on {
            buffer[index] |= bit;
        } else {
            buffer[index] &= !bit;
        }
    }

    fn fill(&mut self, on: bool) {
        let fill_byte = if on { 0xFF } else { 0x00 };
        for elem in self.get_mut_buffer().iter_mut() {
            *elem = fill_byte;
        }
    }
}

#[rustfmt::skip]
//returns index position in the u8-slice and the bit-position inside that u8
pub(crate) fn find_position(x: usize, y: usize) -> (usize, u8) {
    (
        (y / 8) * WIDTH + x,
        1 << (y % 8)
    )
}
