//! Bus abstraction between the driver and the panel
pub use display_interface::DisplayError;

use crate::cmd::Cmd;
use crate::flag::Flag;
use crate::region::Region;

/// Write access to the controller chips.
///
/// Calls must reach the panel in the order they are made; the controller
/// latches page and column state between writes.
pub trait Transport {
    /// Route following commands and data to one chip
    fn select_region(&mut self, region: Region) -> Result<(), DisplayError>;

    /// Send a command byte to the selected chip
    fn write_command(&mut self, command: u8) -> Result<(), DisplayError>;

    /// Send a display RAM byte to the selected chip
    fn write_data(&mut self, data: u8) -> Result<(), DisplayError>;

    /// Set the page (X address) register, 0..8
    fn set_page(&mut self, page: u8) -> Result<(), DisplayError> {
        self.write_command(Cmd::SET_PAGE | (page & Flag::PAGE_MASK))
    }

    /// Set the column (Y address) register, 0..64
    fn set_column(&mut self, column: u8) -> Result<(), DisplayError> {
        self.write_command(Cmd::SET_COLUMN | (column & Flag::COLUMN_MASK))
    }
}

/// Direction of the shared data bus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusDirection {
    /// Host drives the data lines
    Write,
    /// Panel drives the data lines
    Read,
}

/// Read access to the controller chips, used for status and RAM readback
pub trait ReadTransport: Transport {
    /// Switch the data lines between driving and sampling
    fn set_bus_direction(&mut self, direction: BusDirection) -> Result<(), DisplayError>;

    /// Read a display RAM byte from the selected chip
    fn read_data(&mut self) -> Result<u8, DisplayError>;

    /// Read the status byte of the selected chip
    fn read_status(&mut self) -> Result<u8, DisplayError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn select_region(&mut self, region: Region) -> Result<(), DisplayError> {
        (**self).select_region(region)
    }

    fn write_command(&mut self, command: u8) -> Result<(), DisplayError> {
        (**self).write_command(command)
    }

    fn write_data(&mut self, data: u8) -> Result<(), DisplayError> {
        (**self).write_data(data)
    }

    fn set_page(&mut self, page: u8) -> Result<(), DisplayError> {
        (**self).set_page(page)
    }

    fn set_column(&mut self, column: u8) -> Result<(), DisplayError> {
        (**self).set_column(column)
    }
}

impl<T: ReadTransport + ?Sized> ReadTransport for &mut T {
    fn set_bus_direction(&mut self, direction: BusDirection) -> Result<(), DisplayError> {
        (**self).set_bus_direction(direction)
    }

    fn read_data(&mut self) -> Result<u8, DisplayError> {
        (**self).read_data()
    }

    fn read_status(&mut self) -> Result<u8, DisplayError> {
        (**self).read_status()
    }
}
