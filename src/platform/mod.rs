use std::path::PathBuf;

use crate::error::Result;

/// Where owner information comes from. The resolver only talks to this trait,
/// so it can be driven by a fake process table in tests.
pub trait ProcessSource {
    /// Identifiers of the processes currently visible.
    fn pids(&self) -> Result<Vec<u32>>;
    /// Socket inodes referenced by the descriptors of `pid`, one entry per
    /// descriptor. Descriptors that cannot be read are left out.
    fn socket_inodes(&self, pid: u32) -> Result<Vec<u64>>;
    /// Raw contents of the short process name source, if readable.
    fn comm(&self, pid: u32) -> Option<String>;
    /// Command-line arguments, if readable.
    fn cmdline(&self, pid: u32) -> Option<Vec<String>>;
}

#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Mount point of procfs.
    pub proc_root: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            proc_root: PathBuf::from("/proc"),
        }
    }
}

#[cfg(target_os = "linux")]
mod linux;

#[cfg(not(target_os = "linux"))]
compile_error!("ports reads Linux procfs socket tables and only builds on Linux");

pub fn create_source(config: SourceConfig) -> Box<dyn ProcessSource> {
    Box::new(linux::ProcfsSource::new(config))
}
