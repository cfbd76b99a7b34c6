//! EQDS capture decoding library.
//!
//! The heart of the crate is the EQDS header decoder in
//! [`protocols::eqds`]: one flag octet picks a control or data layout, seven
//! big-endian field bytes follow, and untrimmed data headers hand their
//! payload to a next-layer printer. Decoding is stateless and byte-oriented.
//! Every read is bounded by the captured bytes rather than by the length the
//! packet declares.
//!
//! Around it sit a capture source (`PcapFileSource`) and a capture walk
//! (`dump_pcap_file` / `dump_source`). The walk finds EQDS datagrams by UDP
//! port and prints one line per packet. It also aggregates counters into a
//! serializable [`CaptureSummary`].
//!
//! # Examples
//! ```
//! use eqds_core::{DecodeOptions, print_packet};
//!
//! let bytes = [0x00, 0x01, 0xfc, 0x00, 0x00, 0x05, 0x00, 0x0a];
//! let (line, outcome) = print_packet(&bytes, bytes.len(), DecodeOptions::default());
//! assert_eq!(line, "EQDS [none], Seq 5, Pull Target 10: EQDS Native Protocol");
//! assert!(outcome.is_decoded());
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
pub mod protocols;
mod source;

pub use analysis::{AnalysisError, DumpOptions, PacketCounters, dump_pcap_file, dump_source};
pub use protocols::common::TextSink;
pub use protocols::eqds::{
    AckKind, ControlHeader, DataHeader, DecodeOptions, DecodeOutcome, EqdsError, EqdsHeader,
    FlagSet, NextLayer, NextProtocol, parse_header, print_eqds, print_packet,
};
pub use protocols::ip::IpPrinter;
pub use source::{PacketEvent, PacketSource, PcapFileSource, SourceError};

/// Current summary schema version.
pub const SUMMARY_VERSION: u32 = 1;

/// Counters and time bounds for one capture walk.
///
/// # Examples
/// ```
/// use eqds_core::{PacketCounters, make_summary};
///
/// let summary = make_summary(PacketCounters::default());
/// assert_eq!(summary.summary_version, eqds_core::SUMMARY_VERSION);
/// assert_eq!(summary.eqds_packets, 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureSummary {
    /// Summary schema version (not the binary version).
    pub summary_version: u32,
    pub tool: ToolInfo,
    /// Absent when the packets did not come from a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<InputInfo>,
    pub packets_total: u64,
    pub udp_packets: u64,
    pub eqds_packets: u64,
    pub control_packets: u64,
    pub data_packets: u64,
    pub invalid_packets: u64,
    pub truncated_packets: u64,
    /// RFC3339 timestamp of the earliest packet, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_start: Option<String>,
    /// RFC3339 timestamp of the latest packet, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_end: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the walk.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Build a summary from finished counters; time bounds and input are left
/// for the caller to fill.
pub fn make_summary(counters: PacketCounters) -> CaptureSummary {
    CaptureSummary {
        summary_version: SUMMARY_VERSION,
        tool: ToolInfo {
            name: "eqdsdump".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: None,
        packets_total: counters.packets_total,
        udp_packets: counters.udp_packets,
        eqds_packets: counters.eqds_packets,
        control_packets: counters.control_packets,
        data_packets: counters.data_packets,
        invalid_packets: counters.invalid_packets,
        truncated_packets: counters.truncated_packets,
        time_start: None,
        time_end: None,
    }
}
