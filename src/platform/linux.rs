use std::fs;
use std::path::PathBuf;

use log::debug;
use procfs::process::{FDTarget, Process};

use super::{ProcessSource, SourceConfig};
use crate::error::{PortsError, Result};

/// `ProcessSource` backed by a procfs mount.
pub struct ProcfsSource {
    root: PathBuf,
}

impl ProcfsSource {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            root: config.proc_root,
        }
    }

    fn pid_dir(&self, pid: u32) -> PathBuf {
        self.root.join(pid.to_string())
    }

    fn process(&self, pid: u32) -> Result<Process> {
        Process::new_with_root(self.pid_dir(pid))
            .map_err(|e| PortsError::Platform(format!("cannot open process {}: {}", pid, e)))
    }
}

impl ProcessSource for ProcfsSource {
    fn pids(&self) -> Result<Vec<u32>> {
        let all_procs = procfs::process::all_processes_with_root(&self.root).map_err(|e| {
            PortsError::Platform(format!("cannot read {}: {}", self.root.display(), e))
        })?;

        let mut pids = Vec::new();
        for proc_result in all_procs {
            match proc_result {
                Ok(p) => pids.push(p.pid as u32),
                Err(e) => debug!("skipping process entry: {}", e),
            }
        }
        Ok(pids)
    }

    fn socket_inodes(&self, pid: u32) -> Result<Vec<u64>> {
        let process = self.process(pid)?;

        let fds = process
            .fd()
            .map_err(|e| PortsError::Platform(format!("cannot list fds of {}: {}", pid, e)))?;

        let mut inodes = Vec::new();
        for fd_info in fds {
            let fd_info = match fd_info {
                Ok(fi) => fi,
                Err(e) => {
                    // Closed between listing and readlink, or not ours to read.
                    debug!("pid {}: skipping fd: {}", pid, e);
                    continue;
                }
            };

            if let FDTarget::Socket(inode) = fd_info.target {
                inodes.push(inode);
            }
        }

        Ok(inodes)
    }

    fn comm(&self, pid: u32) -> Option<String> {
        // The kernel does not require comm to be UTF-8 (PR_SET_NAME takes bytes).
        let raw = fs::read(self.pid_dir(pid).join("comm")).ok()?;
        Some(String::from_utf8_lossy(&raw).into_owned())
    }

    fn cmdline(&self, pid: u32) -> Option<Vec<String>> {
        self.process(pid).ok()?.cmdline().ok()
    }
}
