use crate::protocols::eqds::{DecodeOutcome, EqdsHeader};

/// Running packet counters for one capture walk.
///
/// `control_packets` and `data_packets` only count headers that decoded
/// cleanly; invalid and truncated packets are counted on their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PacketCounters {
    pub packets_total: u64,
    pub udp_packets: u64,
    pub eqds_packets: u64,
    pub control_packets: u64,
    pub data_packets: u64,
    pub invalid_packets: u64,
    pub truncated_packets: u64,
}

impl PacketCounters {
    pub fn record_outcome(&mut self, outcome: &DecodeOutcome) {
        self.eqds_packets += 1;
        match outcome {
            DecodeOutcome::Decoded { header, .. } => match header {
                EqdsHeader::Control(_) => self.control_packets += 1,
                EqdsHeader::Data(_) => self.data_packets += 1,
            },
            DecodeOutcome::Invalid(_) => self.invalid_packets += 1,
            DecodeOutcome::Truncated(_) => self.truncated_packets += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PacketCounters;
    use crate::protocols::eqds::{DecodeOptions, print_packet};

    #[test]
    fn outcomes_land_in_their_bucket() {
        let mut counters = PacketCounters::default();
        let cases: [(&[u8], usize); 5] = [
            (&[0x08, 0, 0, 0, 0, 1, 0, 2], 8),
            (&[0x00, 0, 0xfc, 0, 0, 1, 0, 2], 8),
            (&[0x00, 0, 0x99, 0, 0, 1, 0, 2], 8),
            (&[0x00, 0, 0xfc], 8),
            (&[0x00], 1),
        ];
        for (payload, declared) in cases {
            let (_, outcome) = print_packet(payload, declared, DecodeOptions::default());
            counters.record_outcome(&outcome);
        }

        assert_eq!(counters.eqds_packets, 5);
        assert_eq!(counters.control_packets, 1);
        assert_eq!(counters.data_packets, 1);
        assert_eq!(counters.invalid_packets, 2);
        assert_eq!(counters.truncated_packets, 1);
    }
}
