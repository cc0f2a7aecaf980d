use std::fmt;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Default, Hash)]
pub struct Address(pub u16); //0x0000-0xFFFF

impl Address {
    pub const MONITOR_ENTRY: Self = Self(0xF800);
    pub const TOP: Self = Self(0xFFFF);
    pub const TPA: Self = Self(0x0100); // CP/M transient program area

    #[must_use]
    pub const fn from_be_bytes(hi: u8, lo: u8) -> Self {
        Self(u16::from_be_bytes([hi, lo]))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

impl fmt::UpperHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

/// A memory image ready to be emitted: where it loads, where it starts
/// executing and the bytes that go there.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ImageRecord {
    pub name: String,
    pub start: Address,
    pub end: Address,
    pub entry: Address,
    pub bytes: Vec<u8>,
}

/// Number of bytes covered by the inclusive `start..=end` range, zero when
/// `start > end`.
pub(crate) fn span(start: Address, end: Address) -> usize {
    if start > end {
        0
    } else {
        usize::from(end.0.abs_diff(start.0)).saturating_add(1)
    }
}
