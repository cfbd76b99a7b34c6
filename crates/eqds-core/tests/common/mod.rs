#![allow(dead_code)]

use std::fs;
use std::path::Path;

use etherparse::PacketBuilder;

pub const LINKTYPE_ETHERNET: u32 = 1;
pub const LINKTYPE_RAW: u32 = 101;

pub struct Record {
    pub ts_sec: u32,
    pub ts_usec: u32,
    pub data: Vec<u8>,
    /// Length of the frame on the wire; `data` may hold fewer bytes.
    pub orig_len: u32,
}

impl Record {
    pub fn new(ts_sec: u32, ts_usec: u32, data: Vec<u8>) -> Self {
        let orig_len = data.len() as u32;
        Self {
            ts_sec,
            ts_usec,
            data,
            orig_len,
        }
    }

    /// Keep only the first `snaplen` bytes, as a capture with that snap
    /// length would.
    pub fn snapped(mut self, snaplen: usize) -> Self {
        self.data.truncate(snaplen);
        self
    }
}

/// Write a little-endian legacy pcap file with microsecond timestamps.
pub fn write_pcap(path: &Path, linktype: u32, records: &[Record]) {
    let mut out = Vec::new();
    out.extend_from_slice(&0xa1b2_c3d4u32.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&4u16.to_le_bytes());
    out.extend_from_slice(&0i32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&65535u32.to_le_bytes());
    out.extend_from_slice(&linktype.to_le_bytes());
    for record in records {
        let incl_len = record.data.len() as u32;
        out.extend_from_slice(&record.ts_sec.to_le_bytes());
        out.extend_from_slice(&record.ts_usec.to_le_bytes());
        out.extend_from_slice(&incl_len.to_le_bytes());
        out.extend_from_slice(&record.orig_len.to_le_bytes());
        out.extend_from_slice(&record.data);
    }
    fs::write(path, out).expect("write pcap");
}

pub fn eth_udp(src_port: u16, dst_port: u16, payload: &[u8]) -> Vec<u8> {
    let builder = PacketBuilder::ethernet2([2, 0, 0, 0, 0, 1], [2, 0, 0, 0, 0, 2])
        .ipv4([10, 1, 0, 1], [10, 1, 0, 2], 64)
        .udp(src_port, dst_port);
    let mut frame = Vec::<u8>::with_capacity(builder.size(payload.len()));
    builder.write(&mut frame, payload).expect("build frame");
    frame
}

pub fn ip_udp(src_port: u16, dst_port: u16, payload: &[u8]) -> Vec<u8> {
    let builder = PacketBuilder::ipv4([192, 168, 1, 1], [192, 168, 1, 2], 32).udp(src_port, dst_port);
    let mut packet = Vec::<u8>::with_capacity(builder.size(payload.len()));
    builder.write(&mut packet, payload).expect("build packet");
    packet
}

pub fn data_header(flags: u8, next_protocol: u8, seq: u16, pull_target: u16) -> Vec<u8> {
    let mut hdr = vec![flags, 1, next_protocol, 0];
    hdr.extend_from_slice(&seq.to_be_bytes());
    hdr.extend_from_slice(&pull_target.to_be_bytes());
    hdr
}

pub fn control_header(flags: u8, window: u16, ack: u16, pull: u16) -> Vec<u8> {
    let mut hdr = vec![flags, 2];
    hdr.extend_from_slice(&window.to_be_bytes());
    hdr.extend_from_slice(&ack.to_be_bytes());
    hdr.extend_from_slice(&pull.to_be_bytes());
    hdr
}
