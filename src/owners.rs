//! Correlates socket records with the processes holding them.

use std::collections::HashMap;

use log::{debug, warn};

use crate::model::{Owner, SocketRecord, NO_INODE};
use crate::platform::ProcessSource;

/// Name given to an owner whose `comm` and `cmdline` are both unreadable.
pub const UNKNOWN_NAME: &str = "?";

/// Append an `Owner` to every record whose inode is referenced by some
/// process's descriptor table.
///
/// Processes that vanish or deny access mid-scan are skipped; sockets nobody
/// could be found for keep an empty owner list. Owners are not deduplicated:
/// a process holding the same socket through two descriptors is listed twice.
pub fn resolve_owners(records: &mut [SocketRecord], source: &dyn ProcessSource) {
    let mut by_inode: HashMap<u64, Vec<usize>> = HashMap::new();
    for (idx, record) in records.iter().enumerate() {
        if record.inode() != NO_INODE {
            by_inode.entry(record.inode()).or_default().push(idx);
        }
    }
    if by_inode.is_empty() {
        return;
    }

    let pids = match source.pids() {
        Ok(pids) => pids,
        Err(e) => {
            warn!("cannot enumerate processes, owners left empty: {}", e);
            return;
        }
    };

    for pid in pids {
        let inodes = match source.socket_inodes(pid) {
            Ok(inodes) => inodes,
            Err(e) => {
                debug!("pid {}: {}", pid, e);
                continue;
            }
        };

        let mut name: Option<String> = None;
        for inode in inodes {
            let Some(indices) = by_inode.get(&inode) else {
                continue;
            };
            let name = name.get_or_insert_with(|| process_name(source, pid));
            for &idx in indices {
                records[idx].push_owner(Owner::new(pid, name.clone()));
            }
        }
    }
}

/// Pick a display name for `pid`: `comm` first, then the command-line
/// arguments joined by spaces, then `"?"`.
pub fn process_name(source: &dyn ProcessSource, pid: u32) -> String {
    if let Some(comm) = source.comm(pid) {
        let comm = comm.strip_suffix('\n').unwrap_or(&comm);
        if !comm.is_empty() {
            return comm.to_string();
        }
    }

    if let Some(args) = source.cmdline(pid) {
        let line = args
            .iter()
            .filter(|a| !a.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        if !line.is_empty() {
            return line;
        }
    }

    UNKNOWN_NAME.to_string()
}
