use serde::Serialize;

/// Reserved pid meaning "no owner". Never a real process in a procfs scan.
pub const NO_OWNER_PID: u32 = 0;

/// A process holding a descriptor that references a socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Owner {
    pub pid: u32,
    /// Best-effort label; `"?"` when neither `comm` nor `cmdline` was readable.
    pub name: String,
}

impl Owner {
    pub fn new(pid: u32, name: impl Into<String>) -> Self {
        Owner {
            pid,
            name: name.into(),
        }
    }

    /// `pid/name`, the form used in the table's OWNERS column.
    pub fn display_label(&self) -> String {
        format!("{}/{}", self.pid, self.name)
    }
}
