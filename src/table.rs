//! Parsing of the kernel's per-protocol socket tables.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, trace};

use crate::model::{Protocol, SocketRecord, NO_INODE};

/// State column value for TCP_LISTEN.
pub const LISTEN_STATE: &str = "0A";

// Field positions in a table line.
const LOCAL_FIELD: usize = 1;
const STATE_FIELD: usize = 3;
const INODE_FIELD: usize = 9;

/// Parse one socket table (`tcp`, `tcp6`, `udp` or `udp6` format).
///
/// A missing or unreadable file is not an error; it simply contributes no
/// records. Malformed lines are skipped one at a time.
pub fn parse_table(path: &Path, protocol: Protocol, listen_only: bool) -> Vec<SocketRecord> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            debug!("skipping {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    parse_lines(BufReader::new(file), protocol, listen_only)
}

/// Parse the four standard tables found in `net_dir` (normally `/proc/net`),
/// in `tcp`, `tcp6`, `udp`, `udp6` order.
pub fn collect_sockets(net_dir: &Path, listen_only: bool) -> Vec<SocketRecord> {
    let mut records = Vec::new();
    for protocol in Protocol::ALL {
        let path = net_dir.join(protocol.label());
        let parsed = parse_table(&path, protocol, listen_only);
        debug!("{}: {} socket(s)", path.display(), parsed.len());
        records.extend(parsed);
    }
    records
}

fn parse_lines<R: BufRead>(
    reader: R,
    protocol: Protocol,
    listen_only: bool,
) -> Vec<SocketRecord> {
    let mut records = Vec::new();

    // First line is the column header.
    for line in reader.lines().skip(1) {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                debug!("stopped reading {} table: {}", protocol, e);
                break;
            }
        };

        if let Some(record) = parse_line(&line, protocol, listen_only) {
            records.push(record);
        }
    }

    records
}

fn parse_line(line: &str, protocol: Protocol, listen_only: bool) -> Option<SocketRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() <= STATE_FIELD {
        trace!("{}: short line {:?}", protocol, line);
        return None;
    }

    if listen_only && fields[STATE_FIELD] != LISTEN_STATE {
        return None;
    }

    let Some((addr_hex, port_hex)) = fields[LOCAL_FIELD].split_once(':') else {
        trace!("{}: no port in local address {:?}", protocol, fields[LOCAL_FIELD]);
        return None;
    };

    let inode = fields
        .get(INODE_FIELD)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(NO_INODE);

    let record = SocketRecord::new(protocol, addr_hex, port_hex, inode);
    trace!(
        "{} {} -> {}:{} inode {}",
        protocol,
        record.local_address_raw(),
        record.local_address(),
        record.port(),
        record.inode(),
    );
    Some(record)
}
