use std::net::IpAddr;

use etherparse::{NetSlice, SlicedPacket, TransportSlice};

use crate::protocols::common::TextSink;
use crate::protocols::eqds::NextLayer;

pub const TRUNCATED_MARKER: &str = "[|ip]";

/// Stateless IP summary printer.
#[derive(Debug, Clone, Copy, Default)]
pub struct IpPrinter;

impl NextLayer for IpPrinter {
    fn print_ip(&self, sink: &mut dyn TextSink, tail: &[u8], remaining_len: usize) {
        let bounded = &tail[..tail.len().min(remaining_len)];
        match summarize(bounded) {
            Some(line) => sink.push(&line),
            None => {
                tracing::debug!(
                    captured = tail.len(),
                    declared = remaining_len,
                    "ip payload could not be sliced"
                );
                sink.push("IP ");
                sink.push(TRUNCATED_MARKER);
            }
        }
    }
}

fn summarize(data: &[u8]) -> Option<String> {
    let sliced = SlicedPacket::from_ip(data).ok()?;
    let net = sliced.net?;
    let (tag, src, dst) = match net {
        NetSlice::Ipv4(ref ipv4) => (
            "IP",
            IpAddr::V4(ipv4.header().source_addr()),
            IpAddr::V4(ipv4.header().destination_addr()),
        ),
        NetSlice::Ipv6(ref ipv6) => (
            "IP6",
            IpAddr::V6(ipv6.header().source_addr()),
            IpAddr::V6(ipv6.header().destination_addr()),
        ),
    };

    let line = match sliced.transport {
        Some(TransportSlice::Udp(udp)) => format!(
            "{tag} {src}.{} > {dst}.{}: UDP, length {}",
            udp.source_port(),
            udp.destination_port(),
            udp.payload().len()
        ),
        Some(TransportSlice::Tcp(tcp)) => format!(
            "{tag} {src}.{} > {dst}.{}: TCP, length {}",
            tcp.source_port(),
            tcp.destination_port(),
            tcp.payload().len()
        ),
        _ => {
            let ip_payload = net.ip_payload_ref()?;
            format!(
                "{tag} {src} > {dst}: ip-proto-{} {}",
                ip_payload.ip_number.0,
                ip_payload.payload.len()
            )
        }
    };
    Some(line)
}
