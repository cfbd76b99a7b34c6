//! PCAP/PCAPNG source implementation.
//!
//! Provides a `PacketSource` backed by capture files. File I/O and block
//! parsing stay here; the capture walk only sees `PacketEvent`s.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::PcapFileSource;
