use std::io::{Read, Seek, SeekFrom};

use super::error::PcapSourceError;
use super::layout;
use pcap_parser::Linktype;

/// Read the leading magic and rewind so the block reader starts at offset 0.
///
/// # Errors
/// Returns `PcapSourceError::Io` when fewer than four bytes are available or
/// the reader cannot seek back.
pub fn read_magic_and_rewind<R: Read + Seek>(reader: &mut R) -> Result<[u8; 4], PcapSourceError> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    reader.seek(SeekFrom::Start(0))?;
    Ok(magic)
}

pub fn is_pcapng_magic(magic: &[u8; 4]) -> bool {
    magic == &layout::PCAPNG_MAGIC
}

/// Linktype of a PCAPNG interface, falling back to Ethernet for interfaces
/// that were never described.
pub fn linktype_for_interface(linktypes: &[Linktype], if_id: u32) -> Linktype {
    linktypes
        .get(if_id as usize)
        .copied()
        .unwrap_or(Linktype::ETHERNET)
}

/// Seconds from a PCAPNG 64-bit microsecond timestamp split in two words.
pub fn pcapng_ts_to_seconds(ts_high: u32, ts_low: u32) -> f64 {
    let ts = ((ts_high as u64) << 32) | (ts_low as u64);
    ts as f64 * 1e-6
}

pub fn legacy_ts_to_seconds(ts_sec: u32, ts_usec: u32) -> f64 {
    ts_sec as f64 + (ts_usec as f64 * 1e-6)
}

#[cfg(test)]
mod tests {
    use super::{
        is_pcapng_magic, legacy_ts_to_seconds, linktype_for_interface, pcapng_ts_to_seconds,
        read_magic_and_rewind,
    };
    use crate::source::pcap::error::PcapSourceError;
    use pcap_parser::Linktype;
    use std::io::{Cursor, Read};

    #[test]
    fn legacy_magic_is_not_pcapng() {
        assert!(is_pcapng_magic(&super::layout::PCAPNG_MAGIC));
        assert!(!is_pcapng_magic(&[0xd4, 0xc3, 0xb2, 0xa1]));
    }

    #[test]
    fn read_magic_rewinds() {
        let bytes = [0xd4, 0xc3, 0xb2, 0xa1, 0x02];
        let mut cursor = Cursor::new(bytes);
        let magic = read_magic_and_rewind(&mut cursor).unwrap();
        assert_eq!(magic, [0xd4, 0xc3, 0xb2, 0xa1]);
        let mut buf = [0u8; 1];
        cursor.read_exact(&mut buf).unwrap();
        assert_eq!(buf[0], 0xd4);
    }

    #[test]
    fn read_magic_too_short() {
        let mut cursor = Cursor::new([0x0a, 0x0d]);
        let err = read_magic_and_rewind(&mut cursor).unwrap_err();
        assert!(matches!(err, PcapSourceError::Io(_)));
    }

    #[test]
    fn undescribed_interface_is_ethernet() {
        let linktypes = [Linktype::RAW];
        assert_eq!(linktype_for_interface(&linktypes, 0), Linktype::RAW);
        assert_eq!(linktype_for_interface(&linktypes, 3), Linktype::ETHERNET);
    }

    #[test]
    fn timestamps_convert_to_seconds() {
        assert!((pcapng_ts_to_seconds(0, 2_250_000) - 2.25).abs() < f64::EPSILON);
        assert!((legacy_ts_to_seconds(10, 500_000) - 10.5).abs() < 1e-9);
    }
}
