use crate::protocols::common::TextSink;
use crate::protocols::ip::IpPrinter;

use super::error::EqdsError;
use super::layout;
use super::parser::{ControlHeader, DataHeader, EqdsHeader, read_fields, read_flags};
use super::reader::EqdsReader;

pub const PROTOCOL_TAG: &str = "EQDS ";
pub const INVALID_MARKER: &str = " (invalid)";
pub const TRUNCATED_MARKER: &str = " [|eqds]";
pub const NATIVE_PROTOCOL_TAG: &str = "EQDS Native Protocol";

/// Printing options for a single decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Include window size, path id and the reserved byte.
    pub verbose: bool,
}

/// Collaborator that prints whatever follows an EQDS data header.
pub trait NextLayer {
    /// `tail` is every captured byte after the EQDS header; `remaining_len`
    /// is what the packet claims is left and may disagree with `tail.len()`.
    fn print_ip(&self, sink: &mut dyn TextSink, tail: &[u8], remaining_len: usize);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextProtocol {
    Ip,
    Native,
}

/// Terminal state reached by one decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOutcome {
    Decoded {
        header: EqdsHeader,
        delegated: Option<NextProtocol>,
    },
    /// Rejected in-band; the sink already carries the reason.
    Invalid(EqdsError),
    /// A header field lay past the captured bytes; at most the flags were
    /// printed.
    Truncated(EqdsError),
}

impl DecodeOutcome {
    pub fn is_decoded(&self) -> bool {
        matches!(self, DecodeOutcome::Decoded { .. })
    }

    pub fn header(&self) -> Option<&EqdsHeader> {
        match self {
            DecodeOutcome::Decoded { header, .. } => Some(header),
            _ => None,
        }
    }
}

/// Decode one EQDS header and print its summary into `sink`.
///
/// `declared_len` is the length the enclosing layer reports for this
/// datagram. It gates the minimum-length check and the length handed to the
/// next layer, but reads are bounded only by `payload` itself.
pub fn print_eqds(
    sink: &mut dyn TextSink,
    payload: &[u8],
    declared_len: usize,
    options: DecodeOptions,
    next: &dyn NextLayer,
) -> DecodeOutcome {
    sink.push(PROTOCOL_TAG);
    if declared_len < layout::HDR_LEN {
        sink.push(&format!(" (len {} < {})", declared_len, layout::HDR_LEN));
        sink.push(INVALID_MARKER);
        return DecodeOutcome::Invalid(EqdsError::LengthMismatch {
            declared: declared_len,
            minimum: layout::HDR_LEN,
        });
    }

    let mut reader = EqdsReader::new(payload);
    let flags = match read_flags(&mut reader) {
        Ok(flags) => flags,
        Err(err) => return DecodeOutcome::Truncated(err),
    };
    sink.push(&format!("[{}], ", flags));
    let header = match read_fields(&mut reader, flags) {
        Ok(header) => header,
        Err(err) => return DecodeOutcome::Truncated(err),
    };

    match header {
        EqdsHeader::Control(ref hdr) => {
            print_control(sink, hdr, options);
            DecodeOutcome::Decoded {
                header,
                delegated: None,
            }
        }
        EqdsHeader::Data(ref hdr) => {
            print_data(sink, hdr, options);
            if hdr.flags.is_trimmed() {
                return DecodeOutcome::Decoded {
                    header,
                    delegated: None,
                };
            }
            let tail = reader.remaining();
            let remaining_len = declared_len - layout::HDR_LEN;
            match dispatch(sink, hdr.next_protocol, tail, remaining_len, next) {
                Ok(delegated) => DecodeOutcome::Decoded {
                    header,
                    delegated: Some(delegated),
                },
                Err(err) => DecodeOutcome::Invalid(err),
            }
        }
    }
}

/// Decode one EQDS datagram with the IP printer attached and return the
/// finished line. Truncation is rendered here, once.
pub fn print_packet(
    payload: &[u8],
    declared_len: usize,
    options: DecodeOptions,
) -> (String, DecodeOutcome) {
    let mut line = String::new();
    let outcome = print_eqds(&mut line, payload, declared_len, options, &IpPrinter);
    if let DecodeOutcome::Truncated(err) = outcome {
        tracing::debug!(%err, "eqds header truncated");
        line.push_str(TRUNCATED_MARKER);
    }
    (line, outcome)
}

fn print_control(sink: &mut dyn TextSink, hdr: &ControlHeader, options: DecodeOptions) {
    if let Some(kind) = hdr.ack_kind() {
        sink.push(&format!(
            "{} {}, PULL {}",
            kind.as_str(),
            hdr.ack_number,
            hdr.pull_number
        ));
    } else {
        sink.push("ERROR: unknown flags");
    }
    if options.verbose {
        sink.push(&format!(
            " [Wsize {}, Path ID {}]",
            hdr.window_size, hdr.path_id
        ));
    }
    sink.push(": ");
}

fn print_data(sink: &mut dyn TextSink, hdr: &DataHeader, options: DecodeOptions) {
    sink.push(&format!(
        "Seq {}, Pull Target {}",
        hdr.sequence_number, hdr.pull_target
    ));
    if options.verbose {
        sink.push(&format!(" [Path ID {} RSVD {}]", hdr.path_id, hdr.reserved));
    }
    sink.push(": ");
}

fn dispatch(
    sink: &mut dyn TextSink,
    next_protocol: u8,
    tail: &[u8],
    remaining_len: usize,
    next: &dyn NextLayer,
) -> Result<NextProtocol, EqdsError> {
    match next_protocol {
        layout::NEXT_PROTO_IP => {
            next.print_ip(sink, tail, remaining_len);
            Ok(NextProtocol::Ip)
        }
        layout::NEXT_PROTO_NATIVE => {
            sink.push(NATIVE_PROTOCOL_TAG);
            Ok(NextProtocol::Native)
        }
        value => {
            sink.push(&format!("ERROR: unknown-next-protocol {}", value));
            sink.push(INVALID_MARKER);
            Err(EqdsError::UnknownNextProtocol { value })
        }
    }
}
