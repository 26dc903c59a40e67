use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "ports",
    version,
    about = "List listening sockets and the processes that own them"
)]
pub struct CliArgs {
    /// Show sockets in every state, not just LISTEN
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Only show sockets bound to this port
    #[arg(short = 'p', long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    /// Only show sockets owned by a process whose name contains NAME (case-insensitive)
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Sort key: port, pid or proto
    #[arg(short = 's', long = "sort", value_name = "KEY", default_value = "port")]
    pub sort: String,

    /// Reverse the sort order
    #[arg(short = 'r', long = "reverse")]
    pub reverse: bool,

    /// Print JSON instead of a table
    #[arg(short = 'j', long = "json")]
    pub json: bool,

    /// Where procfs is mounted
    #[arg(long = "proc-root", value_name = "DIR", default_value = "/proc")]
    pub proc_root: PathBuf,
}
