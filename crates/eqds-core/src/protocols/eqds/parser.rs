use super::error::EqdsError;
use super::flags::FlagSet;
use super::layout;
use super::reader::EqdsReader;

/// Acknowledgement and flow-control header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlHeader {
    pub flags: FlagSet,
    pub path_id: u8,
    pub window_size: u16,
    pub ack_number: u16,
    pub pull_number: u16,
}

/// Sequenced data header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataHeader {
    pub flags: FlagSet,
    pub path_id: u8,
    pub next_protocol: u8,
    /// Carried as one byte on the wire.
    pub reserved: u16,
    pub sequence_number: u16,
    pub pull_target: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqdsHeader {
    Control(ControlHeader),
    Data(DataHeader),
}

/// Which acknowledgement a control header carries, by priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckKind {
    Sack,
    Nack,
    Ack,
}

impl AckKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AckKind::Sack => "SACK",
            AckKind::Nack => "NACK",
            AckKind::Ack => "ACK",
        }
    }
}

impl ControlHeader {
    /// `None` only when the header was built by hand without any control bit.
    pub fn ack_kind(&self) -> Option<AckKind> {
        if self.flags.contains(FlagSet::SACK) {
            Some(AckKind::Sack)
        } else if self.flags.contains(FlagSet::NACK) {
            Some(AckKind::Nack)
        } else if self.flags.contains(FlagSet::ACK) {
            Some(AckKind::Ack)
        } else {
            None
        }
    }
}

impl EqdsHeader {
    pub fn flags(&self) -> FlagSet {
        match self {
            EqdsHeader::Control(hdr) => hdr.flags,
            EqdsHeader::Data(hdr) => hdr.flags,
        }
    }
}

/// Parse the fixed 8-byte EQDS header from the captured bytes.
///
/// The flag octet is inspected once to pick the variant. Any field that lies
/// past the end of `payload` yields `EqdsError::Truncated`.
pub fn parse_header(payload: &[u8]) -> Result<EqdsHeader, EqdsError> {
    let mut reader = EqdsReader::new(payload);
    let flags = read_flags(&mut reader)?;
    read_fields(&mut reader, flags)
}

pub fn read_flags(reader: &mut EqdsReader<'_>) -> Result<FlagSet, EqdsError> {
    Ok(FlagSet::from_bits(reader.read_u8()?))
}

/// Read the seven field bytes that follow the flag octet, in the layout the
/// flags select. On success the reader sits at the start of the payload.
pub fn read_fields(reader: &mut EqdsReader<'_>, flags: FlagSet) -> Result<EqdsHeader, EqdsError> {
    let header = if flags.is_control() {
        EqdsHeader::Control(ControlHeader {
            flags,
            path_id: reader.read_u8()?,
            window_size: reader.read_u16_be()?,
            ack_number: reader.read_u16_be()?,
            pull_number: reader.read_u16_be()?,
        })
    } else {
        EqdsHeader::Data(DataHeader {
            flags,
            path_id: reader.read_u8()?,
            next_protocol: reader.read_u8()?,
            reserved: u16::from(reader.read_u8()?),
            sequence_number: reader.read_u16_be()?,
            pull_target: reader.read_u16_be()?,
        })
    };
    debug_assert_eq!(reader.position(), layout::HDR_LEN);

    Ok(header)
}
