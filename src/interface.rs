//! Parallel bus interface to the LM19264 over GPIO pins
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::region::Region;
use crate::transport::{BusDirection, DisplayError, ReadTransport, Transport};

use log::debug;

/// Time RSTB is held low, then high, during a hard reset
pub const RESET_DELAY_MS: u32 = 5;

/// 8080-style parallel interface: 8 data lines, RS, RW, E, two chip
/// selects and the reset line.
///
/// Data line `n` carries bit `n` of every byte.
pub struct ParallelInterface<D, RS, RW, E, CSA, CSB, RST> {
    data: [D; 8],
    rs: RS,
    rw: RW,
    e: E,
    csa: CSA,
    csb: CSB,
    rst: RST,
}

impl<D, RS, RW, E, CSA, CSB, RST> ParallelInterface<D, RS, RW, E, CSA, CSB, RST>
where
    D: OutputPin,
    RS: OutputPin,
    RW: OutputPin,
    E: OutputPin,
    CSA: OutputPin,
    CSB: OutputPin,
    RST: OutputPin,
{
    /// Create the interface from its pins. Call [`init_pins`] before use.
    ///
    /// [`init_pins`]: ParallelInterface::init_pins
    pub fn new(data: [D; 8], rs: RS, rw: RW, e: E, csa: CSA, csb: CSB, rst: RST) -> Self {
        ParallelInterface {
            data,
            rs,
            rw,
            e,
            csa,
            csb,
            rst,
        }
    }

    /// Drive every line low except RSTB, which is held high
    pub fn init_pins(&mut self) -> Result<(), DisplayError> {
        debug!("init_pins");
        self.set_data_lines(0)?;
        self.rs.set_low().map_err(|_| DisplayError::DCError)?;
        self.rw.set_low().map_err(|_| DisplayError::BusWriteError)?;
        self.e.set_low().map_err(|_| DisplayError::BusWriteError)?;
        self.csa.set_low().map_err(|_| DisplayError::CSError)?;
        self.csb.set_low().map_err(|_| DisplayError::CSError)?;
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        Ok(())
    }

    /// Pulse RSTB low, then give the chips time to come out of reset
    pub fn hard_reset(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        debug!("hard reset");
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(RESET_DELAY_MS);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(RESET_DELAY_MS);
        Ok(())
    }

    /// Latch one byte into the selected chip as a command or as data
    pub fn send(&mut self, value: u8, is_command: bool) -> Result<(), DisplayError> {
        let rs = if is_command {
            self.rs.set_low()
        } else {
            self.rs.set_high()
        };
        rs.map_err(|_| DisplayError::DCError)?;
        self.rw.set_low().map_err(|_| DisplayError::BusWriteError)?;
        self.set_data_lines(value)?;
        self.pulse_enable()
    }

    /// Give the pins back
    #[allow(clippy::type_complexity)]
    pub fn release(self) -> ([D; 8], RS, RW, E, CSA, CSB, RST) {
        (
            self.data, self.rs, self.rw, self.e, self.csa, self.csb, self.rst,
        )
    }

    fn set_data_lines(&mut self, value: u8) -> Result<(), DisplayError> {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            pin.set_state((value & (1 << bit) != 0).into())
                .map_err(|_| DisplayError::BusWriteError)?;
        }
        Ok(())
    }

    fn pulse_enable(&mut self) -> Result<(), DisplayError> {
        self.e.set_high().map_err(|_| DisplayError::BusWriteError)?;
        self.e.set_low().map_err(|_| DisplayError::BusWriteError)
    }
}

impl<D, RS, RW, E, CSA, CSB, RST> Transport for ParallelInterface<D, RS, RW, E, CSA, CSB, RST>
where
    D: OutputPin,
    RS: OutputPin,
    RW: OutputPin,
    E: OutputPin,
    CSA: OutputPin,
    CSB: OutputPin,
    RST: OutputPin,
{
    fn select_region(&mut self, region: Region) -> Result<(), DisplayError> {
        let (csa, csb) = region.chip_select();
        self.csa
            .set_state(csa.into())
            .map_err(|_| DisplayError::CSError)?;
        self.csb
            .set_state(csb.into())
            .map_err(|_| DisplayError::CSError)
    }

    fn write_command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.send(command, true)
    }

    fn write_data(&mut self, data: u8) -> Result<(), DisplayError> {
        self.send(data, false)
    }
}

/// Reading needs data pins that can be sampled while released, such as
/// open-drain pins with pull-ups. In read direction every data line is set
/// high so the panel can pull it down.
impl<D, RS, RW, E, CSA, CSB, RST> ReadTransport for ParallelInterface<D, RS, RW, E, CSA, CSB, RST>
where
    D: OutputPin + InputPin,
    RS: OutputPin,
    RW: OutputPin,
    E: OutputPin,
    CSA: OutputPin,
    CSB: OutputPin,
    RST: OutputPin,
{
    fn set_bus_direction(&mut self, direction: BusDirection) -> Result<(), DisplayError> {
        match direction {
            BusDirection::Write => self.rw.set_low().map_err(|_| DisplayError::BusWriteError),
            BusDirection::Read => {
                self.rw.set_high().map_err(|_| DisplayError::BusWriteError)?;
                self.set_data_lines(0xFF)
            }
        }
    }

    fn read_data(&mut self) -> Result<u8, DisplayError> {
        self.rs.set_high().map_err(|_| DisplayError::DCError)?;
        self.read_strobe()
    }

    fn read_status(&mut self) -> Result<u8, DisplayError> {
        self.rs.set_low().map_err(|_| DisplayError::DCError)?;
        self.read_strobe()
    }
}

impl<D, RS, RW, E, CSA, CSB, RST> ParallelInterface<D, RS, RW, E, CSA, CSB, RST>
where
    D: OutputPin + InputPin,
    RS: OutputPin,
    RW: OutputPin,
    E: OutputPin,
    CSA: OutputPin,
    CSB: OutputPin,
    RST: OutputPin,
{
    // E high, sample the bus, E low
    fn read_strobe(&mut self) -> Result<u8, DisplayError> {
        self.rw.set_high().map_err(|_| DisplayError::BusWriteError)?;
        self.e.set_high().map_err(|_| DisplayError::BusWriteError)?;
        let mut value = 0;
        for (bit, pin) in self.data.iter_mut().enumerate() {
            if pin.is_high().map_err(|_| DisplayError::BusWriteError)? {
                value |= 1 << bit;
            }
        }
        self.e.set_low().map_err(|_| DisplayError::BusWriteError)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Line {
        Data(u8),
        Rs,
        Rw,
        E,
        Csa,
        Csb,
        Rst,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Event {
        Set(Line, bool),
        Delay(u32),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    // Records level changes and reads the bit of a shared bus value.
    struct MockPin {
        line: Line,
        log: Log,
        bus: Rc<Cell<u8>>,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.log.borrow_mut().push(Event::Set(self.line, false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.log.borrow_mut().push(Event::Set(self.line, true));
            Ok(())
        }
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            match self.line {
                Line::Data(bit) => Ok(self.bus.get() & (1 << bit) != 0),
                _ => Ok(false),
            }
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            self.is_high().map(|high| !high)
        }
    }

    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = ErrorKind;
    }

    impl OutputPin for BrokenPin {
        fn set_low(&mut self) -> Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }

        fn set_high(&mut self) -> Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }
    }

    struct MockDelay {
        log: Log,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.log.borrow_mut().push(Event::Delay(ns));
        }

        fn delay_ms(&mut self, ms: u32) {
            self.delay_ns(ms * 1_000_000);
        }
    }

    type MockInterface = ParallelInterface<MockPin, MockPin, MockPin, MockPin, MockPin, MockPin, MockPin>;

    fn mock_interface() -> (MockInterface, Log, Rc<Cell<u8>>) {
        let log: Log = Rc::default();
        let bus = Rc::new(Cell::new(0));
        let pin = |line| MockPin {
            line,
            log: log.clone(),
            bus: bus.clone(),
        };
        let data = [0, 1, 2, 3, 4, 5, 6, 7].map(|bit| pin(Line::Data(bit)));
        let interface = ParallelInterface::new(
            data,
            pin(Line::Rs),
            pin(Line::Rw),
            pin(Line::E),
            pin(Line::Csa),
            pin(Line::Csb),
            pin(Line::Rst),
        );
        (interface, log, bus)
    }

    fn data_events(value: u8) -> impl Iterator<Item = Event> {
        (0..8).map(move |bit| Event::Set(Line::Data(bit), value & (1 << bit) != 0))
    }

    #[test]
    fn init_pins_leaves_only_reset_high() {
        let (mut interface, log, _) = mock_interface();
        interface.init_pins().unwrap();
        let events = log.borrow();
        for event in events.iter() {
            match event {
                Event::Set(Line::Rst, level) => assert!(*level),
                Event::Set(line, level) => assert!(!*level, "{line:?}"),
                Event::Delay(_) => panic!("no delay expected"),
            }
        }
        assert_eq!(events.len(), 8 + 6);
    }

    #[test]
    fn hard_reset_holds_low_then_high() {
        let (mut interface, log, _) = mock_interface();
        let mut delay = MockDelay { log: log.clone() };
        interface.hard_reset(&mut delay).unwrap();
        assert_eq!(
            *log.borrow(),
            [
                Event::Set(Line::Rst, false),
                Event::Delay(5_000_000),
                Event::Set(Line::Rst, true),
                Event::Delay(5_000_000)
            ]
        );
    }

    #[test]
    fn command_write_sequence() {
        let (mut interface, log, _) = mock_interface();
        interface.write_command(0xB8 | 3).unwrap();

        let mut expected = vec_of([Event::Set(Line::Rs, false), Event::Set(Line::Rw, false)]);
        expected.extend(data_events(0xBB));
        expected.extend([Event::Set(Line::E, true), Event::Set(Line::E, false)]);
        assert_eq!(*log.borrow(), expected);
    }

    #[test]
    fn data_write_raises_rs() {
        let (mut interface, log, _) = mock_interface();
        interface.write_data(0x81).unwrap();
        let events = log.borrow();
        assert_eq!(events[0], Event::Set(Line::Rs, true));
        assert_eq!(events[2], Event::Set(Line::Data(0), true));
        assert_eq!(events[3], Event::Set(Line::Data(1), false));
        assert_eq!(events[9], Event::Set(Line::Data(7), true));
    }

    #[test]
    fn regions_map_to_chip_selects() {
        let (mut interface, log, _) = mock_interface();
        for region in Region::ALL {
            interface.select_region(region).unwrap();
        }
        assert_eq!(
            *log.borrow(),
            [
                Event::Set(Line::Csa, false),
                Event::Set(Line::Csb, false),
                Event::Set(Line::Csa, true),
                Event::Set(Line::Csb, false),
                Event::Set(Line::Csa, false),
                Event::Set(Line::Csb, true),
            ]
        );
    }

    #[test]
    fn reads_sample_the_bus_inside_the_enable_pulse() {
        let (mut interface, log, bus) = mock_interface();
        bus.set(0xA5);
        assert_eq!(interface.read_data().unwrap(), 0xA5);
        assert_eq!(
            *log.borrow(),
            [
                Event::Set(Line::Rs, true),
                Event::Set(Line::Rw, true),
                Event::Set(Line::E, true),
                Event::Set(Line::E, false)
            ]
        );

        log.borrow_mut().clear();
        bus.set(0x90);
        assert_eq!(interface.read_status().unwrap(), 0x90);
        assert_eq!(log.borrow()[0], Event::Set(Line::Rs, false));
    }

    #[test]
    fn read_direction_releases_data_lines() {
        let (mut interface, log, _) = mock_interface();
        interface.set_bus_direction(BusDirection::Read).unwrap();
        let mut expected = vec_of([Event::Set(Line::Rw, true)]);
        expected.extend(data_events(0xFF));
        assert_eq!(*log.borrow(), expected);

        log.borrow_mut().clear();
        interface.set_bus_direction(BusDirection::Write).unwrap();
        assert_eq!(*log.borrow(), [Event::Set(Line::Rw, false)]);
    }

    #[test]
    fn pin_errors_map_to_display_errors() {
        let (interface, log, bus) = mock_interface();
        let (data, rs, rw, e, csa, csb, _) = interface.release();
        let mut broken_rst = ParallelInterface::new(data, rs, rw, e, csa, csb, BrokenPin);
        let mut delay = MockDelay { log: log.clone() };
        assert!(matches!(
            broken_rst.hard_reset(&mut delay),
            Err(DisplayError::RSError)
        ));
        assert!(matches!(
            broken_rst.init_pins(),
            Err(DisplayError::RSError)
        ));

        let pin = |line| MockPin {
            line,
            log: log.clone(),
            bus: bus.clone(),
        };
        let data = [0, 1, 2, 3, 4, 5, 6, 7].map(|bit| pin(Line::Data(bit)));
        let mut broken_cs = ParallelInterface::new(
            data,
            pin(Line::Rs),
            pin(Line::Rw),
            pin(Line::E),
            BrokenPin,
            pin(Line::Csb),
            pin(Line::Rst),
        );
        assert!(matches!(
            broken_cs.select_region(Region::Left),
            Err(DisplayError::CSError)
        ));
        assert!(broken_cs.write_data(0).is_ok());
    }

    fn vec_of<const N: usize>(events: [Event; N]) -> Vec<Event> {
        events.into_iter().collect()
    }
}
