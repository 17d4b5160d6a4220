//! Driver for transferring frames to the LM19264 controller chips
use crate::canvas::FrameBuffer;
use crate::cmd::Cmd;
use crate::codec::PackedFrame;
use crate::flag::Flag;
use crate::region::Region;
use crate::transport::{BusDirection, ReadTransport, Transport};
use crate::{Error, PAGES, REGION_WIDTH, WIDTH};

use log::debug;

/// Default init sequence if none is provided: display on, start line 0
pub const DEFAULT_INIT_SEQUENCE: &[InitStep] = &[InitStep::DisplayOn, InitStep::StartLine(0)];

/// Steps that an init sequence can contain.
/// Each step is sent to one region at a time; the whole sequence runs for
/// the left, middle and right chip in turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitStep {
    /// Turn the display output on
    DisplayOn,
    /// Turn the display output off (RAM is kept)
    DisplayOff,
    /// Set the RAM line shown at the top of the panel, 0..64
    StartLine(u8),
    /// Send a bare command byte
    Cmd(u8),
}

/// Decoded status byte of one chip
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Status {
    /// The byte as read from the bus
    pub raw: u8,
    /// The chip is processing an instruction
    pub busy: bool,
    /// The display output is on
    pub display_on: bool,
    /// The chip is in its reset state
    pub reset: bool,
}

impl Status {
    /// Decode a raw status byte
    pub const fn from_raw(raw: u8) -> Self {
        Status {
            raw,
            busy: raw & Flag::STATUS_BUSY != 0,
            display_on: raw & Flag::STATUS_OFF == 0,
            reset: raw & Flag::STATUS_RESET != 0,
        }
    }
}

/// A configured display with a transport.
pub struct Lm19264<T> {
    transport: T,
    /// Panel-specific init sequence provided at construction time.
    init_sequence: &'static [InitStep],
}

impl<T> Lm19264<T>
where
    T: Transport,
{
    /// Create the display driver around a transport.
    pub fn new(transport: T) -> Self {
        debug!("creating new Lm19264 instance");
        Lm19264 {
            transport,
            init_sequence: DEFAULT_INIT_SEQUENCE,
        }
    }

    /// Create with a custom init sequence.
    pub fn with_init_sequence(transport: T, init_sequence: &'static [InitStep]) -> Self {
        debug!("creating new Lm19264 instance with custom init sequence");
        Lm19264 {
            transport,
            init_sequence,
        }
    }

    /// Borrow the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Borrow the transport mutably
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the transport back
    pub fn release(self) -> T {
        self.transport
    }

    /// Run the init sequence on every region
    pub fn init(&mut self) -> Result<(), Error> {
        debug!("initializing lm19264");
        for region in Region::ALL {
            for step in self.init_sequence {
                debug!("init step {:?} on {:?}", step, region);
                match *step {
                    InitStep::DisplayOn => self.set_display_on(region, true)?,
                    InitStep::DisplayOff => self.set_display_on(region, false)?,
                    InitStep::StartLine(line) => self.set_start_line(region, line)?,
                    InitStep::Cmd(c) => {
                        self.transport.select_region(region)?;
                        self.transport.write_command(c)?;
                    }
                }
            }
        }
        debug!("init sequence complete");
        Ok(())
    }

    /// Turn the display output of one region on or off
    pub fn set_display_on(&mut self, region: Region, on: bool) -> Result<(), Error> {
        debug!("set_display_on: {:?} {}", region, on);
        self.transport.select_region(region)?;
        let command = if on { Cmd::DISPLAY_ON } else { Cmd::DISPLAY_OFF };
        self.transport.write_command(command)?;
        Ok(())
    }

    /// Set the RAM line shown at the top of one region
    pub fn set_start_line(&mut self, region: Region, line: u8) -> Result<(), Error> {
        debug!("set_start_line: {:?} {}", region, line);
        self.transport.select_region(region)?;
        self.transport
            .write_command(Cmd::SET_START_LINE | (line & Flag::START_LINE_MASK))?;
        Ok(())
    }

    /// Send a full frame.
    ///
    /// For each page, each region is selected and given the page address,
    /// then every column is addressed and written. The controller keeps
    /// addressing state between writes, so this order must not change. An
    /// error stops the transfer with the panel partly updated.
    pub fn write_frame(&mut self, frame: &PackedFrame) -> Result<(), Error> {
        debug!("writing frame to lm19264");
        let bytes = frame.as_bytes();
        for page in 0..PAGES {
            for region in Region::ALL {
                self.transport.select_region(region)?;
                self.transport.set_page(page as u8)?;
                for col in 0..REGION_WIDTH {
                    let index = region.index() * REGION_WIDTH + col + page * WIDTH;
                    self.transport.set_column(col as u8)?;
                    self.transport.write_data(bytes[index])?;
                }
            }
        }
        Ok(())
    }

    /// Send a full frame given as raw bytes, which must be exactly
    /// [`FRAME_LEN`](crate::FRAME_LEN) long
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let frame = PackedFrame::from_bytes(bytes).map_err(|err| {
            debug!("rejecting {} byte frame", bytes.len());
            err
        })?;
        self.write_frame(&frame)
    }

    /// Send the contents of a frame buffer
    pub fn flush(&mut self, frame_buffer: &FrameBuffer) -> Result<(), Error> {
        self.write_frame(frame_buffer.frame())
    }

    /// Write a single byte at a hardware address
    pub fn write_byte(
        &mut self,
        region: Region,
        page: u8,
        column: u8,
        data: u8,
    ) -> Result<(), Error> {
        self.transport.select_region(region)?;
        self.transport.set_page(page)?;
        self.transport.set_column(column)?;
        self.transport.write_data(data)?;
        Ok(())
    }

    /// Blank every region and page
    pub fn clear(&mut self) -> Result<(), Error> {
        debug!("clearing lm19264");
        self.write_frame(&PackedFrame::new())
    }
}

impl<T> Lm19264<T>
where
    T: ReadTransport,
{
    /// Read and decode the status byte of one region
    pub fn read_status(&mut self, region: Region) -> Result<Status, Error> {
        self.transport.select_region(region)?;
        self.transport.set_bus_direction(BusDirection::Read)?;
        let raw = self.transport.read_status();
        self.transport.set_bus_direction(BusDirection::Write)?;
        let status = Status::from_raw(raw?);
        debug!("read_status: {:?} {:?}", region, status);
        Ok(status)
    }

    /// Read the whole display RAM back as a packed frame
    pub fn read_frame(&mut self) -> Result<PackedFrame, Error> {
        debug!("reading frame from lm19264");
        let result = self.read_frame_inner();
        // leave the bus driven by the host for normal operation
        self.transport.set_bus_direction(BusDirection::Write)?;
        result
    }

    fn read_frame_inner(&mut self) -> Result<PackedFrame, Error> {
        let mut frame = PackedFrame::new();
        let bytes = frame.as_mut_bytes();
        for page in 0..PAGES {
            for region in Region::ALL {
                self.transport.select_region(region)?;
                self.transport.set_bus_direction(BusDirection::Write)?;
                self.transport.set_page(page as u8)?;
                self.transport.set_column(0)?;
                self.transport.set_bus_direction(BusDirection::Read)?;

                // the first read after addressing returns stale latch contents
                let _ = self.transport.read_data()?;

                for col in 0..REGION_WIDTH {
                    bytes[region.index() * REGION_WIDTH + col + page * WIDTH] =
                        self.transport.read_data()?;
                }
            }
        }
        Ok(frame)
    }
}
