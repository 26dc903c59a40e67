//! Filtering and ordering of the collected socket records.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::cli::CliArgs;
use crate::error::{PortsError, Result};
use crate::model::SocketRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Port, then protocol label.
    #[default]
    Port,
    /// Lowest owner pid, then protocol label.
    Pid,
    /// Protocol label, then port.
    Protocol,
}

impl FromStr for SortKey {
    type Err = PortsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "port" => Ok(SortKey::Port),
            "pid" => Ok(SortKey::Pid),
            "proto" | "protocol" => Ok(SortKey::Protocol),
            _ => Err(PortsError::InvalidSortKey(s.to_string())),
        }
    }
}

/// What to keep and in which order to present it.
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Exact port match.
    pub port: Option<u16>,
    /// Case-insensitive substring of any owner's name.
    pub name: Option<String>,
    pub sort: SortKey,
    pub reverse: bool,
}

impl Query {
    /// Build a `Query` from parsed CLI arguments.
    pub fn from_cli(args: &CliArgs) -> Result<Self> {
        Ok(Query {
            port: args.port,
            name: args.name.clone(),
            sort: args.sort.parse()?,
            reverse: args.reverse,
        })
    }

    pub fn matches(&self, record: &SocketRecord) -> bool {
        if let Some(port) = self.port {
            if record.port() != port {
                return false;
            }
        }

        match self.name.as_deref() {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                record
                    .owners()
                    .iter()
                    .any(|o| o.name.to_lowercase().contains(&needle))
            }
        }
    }

    pub fn compare(&self, a: &SocketRecord, b: &SocketRecord) -> Ordering {
        let by_proto = || a.protocol().label().cmp(b.protocol().label());
        let ord = match self.sort {
            SortKey::Port => a.port().cmp(&b.port()).then_with(by_proto),
            SortKey::Pid => a.primary_pid().cmp(&b.primary_pid()).then_with(by_proto),
            SortKey::Protocol => by_proto().then_with(|| a.port().cmp(&b.port())),
        };
        if self.reverse {
            ord.reverse()
        } else {
            ord
        }
    }

    /// Drop non-matching records and sort the rest. The sort is stable, so
    /// records equal under the key keep their collection order.
    pub fn apply(&self, mut records: Vec<SocketRecord>) -> Vec<SocketRecord> {
        records.retain(|r| self.matches(r));
        records.sort_by(|a, b| self.compare(a, b));
        records
    }
}
