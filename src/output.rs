use std::io::{self, Write};

use crate::cli::CliArgs;
use crate::error::Result;
use crate::model::SocketRecord;

/// Shown in the OWNERS column when no process could be tied to the socket.
pub const NO_OWNER: &str = "(no owner found)";

const ADDR_WIDTH: usize = 39;

/// Renders the final record set as a table or as JSON.
pub struct OutputFormatter {
    /// `-j` flag: JSON array instead of a table.
    pub json: bool,
}

impl OutputFormatter {
    /// Build an `OutputFormatter` from parsed CLI arguments.
    pub fn from_cli(args: &CliArgs) -> Self {
        OutputFormatter { json: args.json }
    }

    /// Write the report to stdout.
    pub fn print(&self, records: &[SocketRecord]) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_to(&mut out, records)?;
        out.flush()?;
        Ok(())
    }

    pub fn write_to(&self, out: &mut dyn Write, records: &[SocketRecord]) -> Result<()> {
        if self.json {
            write_json(out, records)
        } else {
            write_table(out, records)
        }
    }
}

fn write_table(out: &mut dyn Write, records: &[SocketRecord]) -> Result<()> {
    writeln!(
        out,
        "{:<5} {:<width$} {:>5} {:>10}  {}",
        "PROTO",
        "LOCAL ADDRESS",
        "PORT",
        "INODE",
        "OWNERS",
        width = ADDR_WIDTH,
    )?;

    for record in records {
        writeln!(
            out,
            "{:<5} {:<width$} {:>5} {:>10}  {}",
            record.protocol(),
            record.local_address(),
            record.port(),
            record.inode(),
            format_owners(record),
            width = ADDR_WIDTH,
        )?;
    }
    Ok(())
}

fn write_json(out: &mut dyn Write, records: &[SocketRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, records)?;
    writeln!(out)?;
    Ok(())
}

/// `pid/name` for every owner, comma separated.
fn format_owners(record: &SocketRecord) -> String {
    if record.owners().is_empty() {
        return NO_OWNER.to_string();
    }
    record
        .owners()
        .iter()
        .map(|o| o.display_label())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Owner, Protocol};

    fn render(json: bool, records: &[SocketRecord]) -> String {
        let mut buf = Vec::new();
        OutputFormatter { json }.write_to(&mut buf, records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn sshd() -> SocketRecord {
        let mut r = SocketRecord::new(Protocol::Tcp, "00000000", "0016", 12345);
        r.push_owner(Owner::new(100, "sshd"));
        r
    }

    #[test]
    fn test_table_header_and_row() {
        let text = render(false, &[sshd()]);
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        for col in ["PROTO", "LOCAL ADDRESS", "PORT", "INODE", "OWNERS"] {
            assert!(header.contains(col), "missing {} in {:?}", col, header);
        }
        let row = lines.next().unwrap();
        assert!(row.starts_with("tcp "));
        assert!(row.contains("0.0.0.0"));
        assert!(row.contains(" 22 "));
        assert!(row.contains("12345"));
        assert!(row.ends_with("100/sshd"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_table_multiple_owners() {
        let mut r = SocketRecord::new(
            Protocol::Tcp6,
            "00000000000000000000000000000000",
            "0050",
            9,
        );
        r.push_owner(Owner::new(10, "nginx"));
        r.push_owner(Owner::new(11, "nginx"));
        let text = render(false, &[r]);
        assert!(text.lines().nth(1).unwrap().ends_with("10/nginx, 11/nginx"));
    }

    #[test]
    fn test_table_no_owner_marker() {
        let r = SocketRecord::new(Protocol::Udp, "0100007F", "0035", 3);
        let text = render(false, &[r]);
        assert!(text.lines().nth(1).unwrap().ends_with(NO_OWNER));
    }

    #[test]
    fn test_table_empty_is_header_only() {
        assert_eq!(render(false, &[]).lines().count(), 1);
    }

    #[test]
    fn test_json_shape() {
        let value: serde_json::Value = serde_json::from_str(&render(true, &[sshd()])).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "protocol": "tcp",
                "port": 22,
                "localAddress": "0.0.0.0",
                "inode": 12345,
                "owners": [{"pid": 100, "name": "sshd"}],
            }])
        );
    }

    #[test]
    fn test_json_no_owner_is_empty_array() {
        let r = SocketRecord::new(Protocol::Udp, "0100007F", "0035", 3);
        let value: serde_json::Value = serde_json::from_str(&render(true, &[r])).unwrap();
        assert_eq!(value[0]["owners"], serde_json::json!([]));
    }

    #[test]
    fn test_json_empty_set() {
        let value: serde_json::Value = serde_json::from_str(&render(true, &[])).unwrap();
        assert_eq!(value, serde_json::json!([]));
    }

    #[test]
    fn test_json_escapes_names() {
        let mut r = SocketRecord::new(Protocol::Tcp, "00000000", "0016", 1);
        r.push_owner(Owner::new(7, "we\"ird\\na\tme\u{1}"));
        let text = render(true, &[r]);
        assert!(text.contains(r#""we\"ird\\na\tme\u0001""#));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["owners"][0]["name"], "we\"ird\\na\tme\u{1}");
    }
}
