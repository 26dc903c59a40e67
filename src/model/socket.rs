use std::fmt;

use serde::Serialize;

use super::owner::{Owner, NO_OWNER_PID};
use crate::addr::{decode_ipv4, decode_ipv6, decode_port};

/// Reserved inode meaning "not correlated". The kernel never hands out inode 0
/// for a socket, so a record carrying it can never be matched to an owner.
pub const NO_INODE: u64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Tcp6,
    Udp,
    Udp6,
}

impl Protocol {
    /// The four tables under `<procfs>/net`, in collection order.
    pub const ALL: [Protocol; 4] = [Protocol::Tcp, Protocol::Tcp6, Protocol::Udp, Protocol::Udp6];

    /// Lowercase label; also the file name of the table under `<procfs>/net`.
    pub fn label(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Tcp6 => "tcp6",
            Protocol::Udp => "udp",
            Protocol::Udp6 => "udp6",
        }
    }

    pub fn is_ipv6(&self) -> bool {
        self.label().contains('6')
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// One row of a kernel socket table, plus the processes found holding it.
///
/// Address, port and inode are fixed at construction; only the owner list
/// grows, and only while owners are being resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocketRecord {
    protocol: Protocol,
    port: u16,
    local_address: String,
    inode: u64,
    owners: Vec<Owner>,
    #[serde(skip)]
    local_address_raw: String,
}

impl SocketRecord {
    /// Build a record from the two halves of a `HEXADDR:HEXPORT` field.
    pub fn new(protocol: Protocol, addr_hex: &str, port_hex: &str, inode: u64) -> Self {
        let local_address = if protocol.is_ipv6() {
            decode_ipv6(addr_hex)
        } else {
            decode_ipv4(addr_hex)
        };

        SocketRecord {
            protocol,
            port: decode_port(port_hex),
            local_address,
            inode,
            owners: Vec::new(),
            local_address_raw: addr_hex.to_string(),
        }
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn local_address(&self) -> &str {
        &self.local_address
    }

    pub fn local_address_raw(&self) -> &str {
        &self.local_address_raw
    }

    pub fn inode(&self) -> u64 {
        self.inode
    }

    pub fn owners(&self) -> &[Owner] {
        &self.owners
    }

    pub(crate) fn push_owner(&mut self, owner: Owner) {
        self.owners.push(owner);
    }

    /// Lowest owner pid, or `NO_OWNER_PID` when nobody was found. Only used
    /// for ordering; the full owner list is what gets displayed.
    pub fn primary_pid(&self) -> u32 {
        self.owners
            .iter()
            .map(|o| o.pid)
            .min()
            .unwrap_or(NO_OWNER_PID)
    }
}
