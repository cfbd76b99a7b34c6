mod common;

use std::fs;

use eqds_core::{PacketSource, PcapFileSource, SourceError};
use pcap_parser::Linktype;
use tempfile::TempDir;

use common::{LINKTYPE_RAW, Record, ip_udp, write_pcap};

#[test]
fn pcap_source_reads_records_in_order() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("raw.pcap");
    write_pcap(
        &path,
        LINKTYPE_RAW,
        &[
            Record::new(1, 0, ip_udp(1, 2, &[0xaa])),
            Record::new(2, 250_000, ip_udp(3, 4, &[0xbb, 0xcc])),
        ],
    );

    let mut source = PcapFileSource::open(&path).unwrap();
    let first = source.next_packet().unwrap().expect("first packet");
    assert_eq!(first.linktype, Linktype::RAW);
    assert_eq!(first.ts, Some(1.0));
    assert_eq!(first.orig_len as usize, first.data.len());

    let second = source.next_packet().unwrap().expect("second packet");
    assert!((second.ts.unwrap() - 2.25).abs() < 1e-9);
    assert_eq!(*second.data.last().unwrap(), 0xcc);

    assert!(source.next_packet().unwrap().is_none());
}

#[test]
fn pcap_source_reports_original_length_of_snapped_record() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("snapped.pcap");
    let frame = ip_udp(5, 6, &[0u8; 12]);
    let wire_len = frame.len();
    write_pcap(&path, LINKTYPE_RAW, &[Record::new(3, 0, frame).snapped(30)]);

    let mut source = PcapFileSource::open(&path).unwrap();
    let packet = source.next_packet().unwrap().expect("packet");
    assert_eq!(packet.data.len(), 30);
    assert_eq!(packet.orig_len as usize, wire_len);
}

#[test]
fn pcap_source_rejects_truncated_file() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("truncated.pcapng");
    fs::write(&path, [0x0a, 0x0d, 0x0d]).unwrap();

    let err = match PcapFileSource::open(&path) {
        Ok(_) => panic!("expected truncated file to be rejected"),
        Err(err) => err,
    };
    assert!(matches!(err, SourceError::Io(_)));
}
