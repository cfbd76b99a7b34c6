//! EQDS (Edge-Queued Datagram Service) header decoding.
//!
//! Every EQDS packet starts with one flag octet followed by seven bytes of
//! fields. Any of the SACK/NACK/ACK bits selects the control layout (path id,
//! window, ack and pull numbers). Otherwise the data layout applies (path id,
//! next protocol, reserved byte, sequence number and pull target). An
//! untrimmed data header is followed by a payload handed to the next layer:
//! IP for protocol 4, or a bare tag for the native protocol (0xFC).
//!
//! The declared datagram length comes from the enclosing layer and is not
//! trusted for bounds. Reads go through `reader`, which stops at the real end
//! of the captured bytes. The flags are printed as soon as the flag octet is
//! read; the remaining fields are printed only once all seven bytes are in.

pub mod error;
pub mod flags;
pub mod layout;
pub mod parser;
pub mod printer;
pub mod reader;

pub use error::EqdsError;
pub use flags::FlagSet;
pub use parser::{AckKind, ControlHeader, DataHeader, EqdsHeader, parse_header, read_fields, read_flags};
pub use printer::{
    DecodeOptions, DecodeOutcome, NextLayer, NextProtocol, print_eqds, print_packet,
};
