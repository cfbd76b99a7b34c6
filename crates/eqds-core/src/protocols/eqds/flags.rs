use std::fmt;

/// The EQDS flag octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlagSet(u8);

impl FlagSet {
    pub const SYN: u8 = 1 << 0;
    pub const NACK: u8 = 1 << 1;
    pub const SACK: u8 = 1 << 2;
    pub const ACK: u8 = 1 << 3;
    pub const EMPTY: u8 = 1 << 4;
    pub const PAUSE: u8 = 1 << 5;
    pub const FIN: u8 = 1 << 6;
    pub const TRIMMED: u8 = 1 << 7;

    /// Bits that turn a header into a control header.
    pub const CONTROL_MASK: u8 = Self::SACK | Self::NACK | Self::ACK;

    /// Render order, most significant bit first.
    const NAMES: [(u8, &'static str); 8] = [
        (Self::TRIMMED, "TRIM"),
        (Self::FIN, "FIN"),
        (Self::PAUSE, "PAUSE"),
        (Self::EMPTY, "EMPTY"),
        (Self::ACK, "ACK"),
        (Self::SACK, "SACK"),
        (Self::NACK, "NACK"),
        (Self::SYN, "SYN"),
    ];

    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    pub fn is_control(self) -> bool {
        self.0 & Self::CONTROL_MASK != 0
    }

    pub fn is_trimmed(self) -> bool {
        self.contains(Self::TRIMMED)
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("none");
        }
        let mut first = true;
        for (bit, name) in Self::NAMES {
            if self.contains(bit) {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}
