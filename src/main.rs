mod addr;
mod cli;
mod error;
mod model;
mod output;
mod owners;
mod platform;
mod query;
mod table;

use std::path::Path;

use clap::Parser;
use cli::CliArgs;
use log::debug;
use model::SocketRecord;
use output::OutputFormatter;
use platform::{create_source, ProcessSource, SourceConfig};
use query::Query;

/// Exit status for a configuration the core refuses to run with.
const EXIT_INVALID_CONFIG: i32 = 2;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();

    // Validate everything before touching procfs.
    let query = match Query::from_cli(&args) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_INVALID_CONFIG);
        }
    };
    let formatter = OutputFormatter::from_cli(&args);

    let source = create_source(SourceConfig {
        proc_root: args.proc_root.clone(),
    });

    let records = build_report(&args.proc_root.join("net"), &*source, !args.all, &query);

    if let Err(e) = formatter.print(&records) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Collect the socket tables under `net_dir`, attach owners from `source`,
/// then filter and order the result.
fn build_report(
    net_dir: &Path,
    source: &dyn ProcessSource,
    listen_only: bool,
    query: &Query,
) -> Vec<SocketRecord> {
    let mut records = table::collect_sockets(net_dir, listen_only);
    debug!("collected {} socket(s)", records.len());

    owners::resolve_owners(&mut records, source);

    query.apply(records)
}
