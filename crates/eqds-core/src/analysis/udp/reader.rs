use super::error::UdpError;
use super::layout;

/// Reads a raw UDP segment (header included).
pub struct UdpReader<'a> {
    segment: &'a [u8],
}

impl<'a> UdpReader<'a> {
    pub fn new(segment: &'a [u8]) -> Self {
        Self { segment }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), UdpError> {
        if self.segment.len() < needed {
            return Err(UdpError::TooShort {
                needed,
                actual: self.segment.len(),
            });
        }
        Ok(())
    }

    pub fn payload_without_header(&self) -> Result<&'a [u8], UdpError> {
        self.require_len(layout::UDP_HEADER_LEN)?;
        self.segment
            .get(layout::UDP_HEADER_LEN..)
            .ok_or(UdpError::TooShort {
                needed: layout::UDP_HEADER_LEN,
                actual: self.segment.len(),
            })
    }

    /// Payload length claimed by the UDP length field, header excluded.
    pub fn declared_payload_len(&self) -> Result<usize, UdpError> {
        let bytes = self
            .segment
            .get(layout::UDP_LENGTH_RANGE.clone())
            .ok_or(UdpError::TooShort {
                needed: layout::UDP_LENGTH_RANGE.end,
                actual: self.segment.len(),
            })?;
        let length = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
        Ok(length.saturating_sub(layout::UDP_HEADER_LEN))
    }
}
