use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::protocols::eqds::{DecodeOptions, print_packet};
use crate::source::{PacketEvent, PacketSource, PcapFileSource, SourceError};
use crate::{CaptureSummary, InputInfo, make_summary};

mod stats;
mod udp;

pub use stats::PacketCounters;
use udp::parse_udp_packet;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Settings for a capture walk.
#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    /// UDP ports that carry EQDS; a datagram matches on either endpoint.
    pub ports: Vec<u16>,
    pub decode: DecodeOptions,
}

impl DumpOptions {
    fn matches(&self, src_port: u16, dst_port: u16) -> bool {
        self.ports.contains(&src_port) || self.ports.contains(&dst_port)
    }
}

/// Walk a capture file, printing one line per EQDS datagram.
pub fn dump_pcap_file<F: FnMut(&str)>(
    path: &Path,
    options: &DumpOptions,
    on_line: F,
) -> Result<CaptureSummary, AnalysisError> {
    let source = PcapFileSource::open(path)?;
    let mut summary = dump_source(source, options, on_line)?;
    summary.input = Some(InputInfo {
        path: path.display().to_string(),
        bytes: path.metadata()?.len(),
    });
    Ok(summary)
}

/// Walk any packet source, printing one line per EQDS datagram.
///
/// Frames that fail to slice or carry no UDP are skipped; a malformed EQDS
/// header never stops the walk.
pub fn dump_source<S: PacketSource, F: FnMut(&str)>(
    mut source: S,
    options: &DumpOptions,
    mut on_line: F,
) -> Result<CaptureSummary, AnalysisError> {
    let mut counters = PacketCounters::default();
    let mut first_ts = None;
    let mut last_ts = None;

    while let Some(PacketEvent {
        ts,
        linktype,
        data,
        orig_len,
    }) = source.next_packet()?
    {
        counters.packets_total += 1;
        update_ts_bounds(&mut first_ts, &mut last_ts, ts);

        let udp = match parse_udp_packet(linktype, &data) {
            Ok(Some(udp)) => udp,
            Ok(None) => continue,
            Err(err) => {
                tracing::debug!(
                    packet = counters.packets_total,
                    captured = data.len(),
                    orig_len,
                    %err,
                    "skipping frame"
                );
                continue;
            }
        };
        counters.udp_packets += 1;
        if !options.matches(udp.src_port, udp.dst_port) {
            continue;
        }

        let (text, outcome) = print_packet(udp.payload, udp.declared_len, options.decode);
        tracing::trace!(packet = counters.packets_total, ?outcome, "eqds packet");
        counters.record_outcome(&outcome);

        let line = format!(
            "{} {} > {}: {}",
            ts_to_rfc3339(ts).unwrap_or_else(|| "-".to_string()),
            SocketAddr::new(udp.src_ip, udp.src_port),
            SocketAddr::new(udp.dst_ip, udp.dst_port),
            text
        );
        on_line(&line);
    }

    let mut summary = make_summary(counters);
    summary.time_start = ts_to_rfc3339(first_ts);
    summary.time_end = ts_to_rfc3339(last_ts);
    Ok(summary)
}

fn update_ts_bounds(first: &mut Option<f64>, last: &mut Option<f64>, ts: Option<f64>) {
    let Some(ts) = ts else {
        return;
    };
    if first.is_none_or(|existing| ts < existing) {
        *first = Some(ts);
    }
    if last.is_none_or(|existing| ts > existing) {
        *last = Some(ts);
    }
}

fn ts_to_rfc3339(ts: Option<f64>) -> Option<String> {
    let ts = ts?;
    let nanos = (ts * 1_000_000_000.0) as i128;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
}
