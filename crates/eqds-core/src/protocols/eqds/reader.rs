use super::error::EqdsError;

/// Forward-only cursor over a captured EQDS header.
///
/// Every read is checked against the real extent of the buffer, never
/// against the length the packet claims for itself.
pub struct EqdsReader<'a> {
    payload: &'a [u8],
    pos: usize,
}

impl<'a> EqdsReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> &'a [u8] {
        self.payload.get(self.pos..).unwrap_or(&[])
    }

    pub fn read_u8(&mut self) -> Result<u8, EqdsError> {
        let bytes = self.take(1)?;
        Ok(bytes[0])
    }

    pub fn read_u16_be(&mut self) -> Result<u16, EqdsError> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], EqdsError> {
        let end = self.pos.checked_add(len).ok_or(EqdsError::Truncated {
            needed: usize::MAX,
            actual: self.payload.len(),
        })?;
        let bytes = self.payload.get(self.pos..end).ok_or(EqdsError::Truncated {
            needed: end,
            actual: self.payload.len(),
        })?;
        self.pos = end;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::EqdsReader;
    use crate::protocols::eqds::error::EqdsError;

    #[test]
    fn reads_advance_cursor() {
        let payload = [0x01, 0x12, 0x34, 0xff];
        let mut reader = EqdsReader::new(&payload);
        assert_eq!(reader.read_u8().unwrap(), 0x01);
        assert_eq!(reader.read_u16_be().unwrap(), 0x1234);
        assert_eq!(reader.position(), 3);
        assert_eq!(reader.remaining(), &[0xff]);
    }

    #[test]
    fn read_past_end_fails_without_moving() {
        let payload = [0x01];
        let mut reader = EqdsReader::new(&payload);
        let err = reader.read_u16_be().unwrap_err();
        assert_eq!(
            err,
            EqdsError::Truncated {
                needed: 2,
                actual: 1
            }
        );
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_u8().unwrap(), 0x01);
    }

    #[test]
    fn empty_buffer() {
        let mut reader = EqdsReader::new(&[]);
        assert!(matches!(
            reader.read_u8(),
            Err(EqdsError::Truncated { needed: 1, actual: 0 })
        ));
        assert!(reader.remaining().is_empty());
    }
}
