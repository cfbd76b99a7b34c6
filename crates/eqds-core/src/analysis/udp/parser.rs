use std::net::IpAddr;

use etherparse::{LaxNetSlice, LaxSlicedPacket, TransportSlice};
use pcap_parser::Linktype;

use super::error::UdpError;
use super::reader::UdpReader;

/// Parsed UDP datagram with its endpoints.
pub struct UdpPacket<'a> {
    pub src_ip: IpAddr,
    pub src_port: u16,
    pub dst_ip: IpAddr,
    pub dst_port: u16,
    /// Captured payload bytes. Shorter than `declared_len` when the capture
    /// was cut off by the snap length.
    pub payload: &'a [u8],
    /// Payload length from the UDP length field.
    pub declared_len: usize,
}

/// Parse a UDP datagram from a link-layer frame.
///
/// Slicing is lax: an IP or UDP length that runs past the captured bytes
/// still yields the datagram, with `payload` holding what was captured.
/// Returns `Ok(None)` when the frame does not carry UDP or uses a link type
/// other than Ethernet or raw IP.
pub fn parse_udp_packet(
    linktype: Linktype,
    data: &[u8],
) -> Result<Option<UdpPacket<'_>>, UdpError> {
    let sliced = match linktype {
        Linktype::ETHERNET => {
            LaxSlicedPacket::from_ethernet(data).map_err(|e| UdpError::Slice(e.to_string()))?
        }
        Linktype::RAW => {
            LaxSlicedPacket::from_ip(data).map_err(|e| UdpError::Slice(e.to_string()))?
        }
        _ => return Ok(None),
    };

    let net = sliced.net.ok_or(UdpError::MissingNetworkLayer)?;
    let udp = match sliced.transport {
        Some(TransportSlice::Udp(udp)) => udp,
        _ => return Ok(None),
    };

    let (src_ip, dst_ip) = match net {
        LaxNetSlice::Ipv4(ref ipv4) => (
            IpAddr::V4(ipv4.header().source_addr()),
            IpAddr::V4(ipv4.header().destination_addr()),
        ),
        LaxNetSlice::Ipv6(ref ipv6) => (
            IpAddr::V6(ipv6.header().source_addr()),
            IpAddr::V6(ipv6.header().destination_addr()),
        ),
    };

    let ip_payload = net.ip_payload_ref().ok_or(UdpError::MissingIpPayload)?;
    let reader = UdpReader::new(ip_payload.payload);
    let payload = reader.payload_without_header()?;
    let declared_len = reader.declared_payload_len()?;

    Ok(Some(UdpPacket {
        src_ip,
        src_port: udp.source_port(),
        dst_ip,
        dst_port: udp.destination_port(),
        payload,
        declared_len,
    }))
}
