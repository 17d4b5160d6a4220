//! Region, page and column addressing
//!
//! The panel is driven by three controller chips side by side. Each chip
//! (a [`Region`]) owns 64 columns and all 8 pages of the display, and has its
//! own page and column registers. A byte of a [`PackedFrame`](crate::PackedFrame)
//! therefore lands on the glass through a `(region, page, column)` triple.

use core::ops::Range;

use crate::{FRAME_LEN, PAGES, REGIONS, REGION_WIDTH, WIDTH};

/// One of the three controller chips
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// Columns 0..64, selected with CSA=0, CSB=0
    Left,
    /// Columns 64..128, selected with CSA=1, CSB=0
    Middle,
    /// Columns 128..192, selected with CSA=0, CSB=1
    Right,
}

impl Region {
    /// All regions in transfer order
    pub const ALL: [Region; REGIONS] = [Region::Left, Region::Middle, Region::Right];

    /// Region number, 0 for the leftmost chip
    pub const fn index(self) -> usize {
        match self {
            Region::Left => 0,
            Region::Middle => 1,
            Region::Right => 2,
        }
    }

    /// Region for a region number
    pub const fn from_index(index: usize) -> Option<Region> {
        match index {
            0 => Some(Region::Left),
            1 => Some(Region::Middle),
            2 => Some(Region::Right),
            _ => None,
        }
    }

    /// Region that drives the logical column `x`
    pub const fn for_column(x: usize) -> Option<Region> {
        Region::from_index(x / REGION_WIDTH)
    }

    /// Logical columns owned by this region
    pub const fn columns(self) -> Range<usize> {
        let start = self.index() * REGION_WIDTH;
        start..start + REGION_WIDTH
    }

    /// Chip select levels `(CSA, CSB)` that address this region
    pub const fn chip_select(self) -> (bool, bool) {
        match self {
            Region::Left => (false, false),
            Region::Middle => (true, false),
            Region::Right => (false, true),
        }
    }
}

/// Hardware address of one packed frame byte
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    /// Chip that owns the byte
    pub region: Region,
    /// Page register value, 0..8
    pub page: u8,
    /// Column register value within the region, 0..64
    pub column: u8,
}

impl Address {
    /// Address of the packed frame byte at `index`, `None` past the frame end
    pub const fn from_index(index: usize) -> Option<Address> {
        if index >= FRAME_LEN {
            return None;
        }
        let page = index / WIDTH;
        let x = index % WIDTH;
        match Region::for_column(x) {
            Some(region) => Some(Address {
                region,
                page: page as u8,
                column: (x % REGION_WIDTH) as u8,
            }),
            None => None,
        }
    }

    /// Index of this address within a packed frame
    pub const fn to_index(self) -> usize {
        self.region.index() * REGION_WIDTH + self.column as usize + self.page as usize * WIDTH
    }
}

/// Every address of a frame in the order the controller must receive it:
/// page outermost, then region, then column
pub fn transfer_order() -> impl Iterator<Item = Address> {
    (0..PAGES as u8).flat_map(|page| {
        Region::ALL.into_iter().flat_map(move |region| {
            (0..REGION_WIDTH as u8).map(move |column| Address {
                region,
                page,
                column,
            })
        })
    })
}
