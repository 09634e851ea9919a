use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::net::Ipv4Addr;
use std::path::Path;
use tracing::{debug, info};

/// The only field of an access-log record we care about.
#[derive(Deserialize)]
struct LogRecord {
    remote_addr: Option<String>,
}

/// Per-file tally of what the reader kept and what it dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub lines: u64,
    pub accepted: u64,
    pub malformed: u64,
    pub missing_address: u64,
    pub not_ipv4: u64,
}

impl IngestStats {
    pub fn skipped(&self) -> u64 {
        self.malformed + self.missing_address + self.not_ipv4
    }
}

enum Skip {
    Malformed,
    MissingAddress,
    NotIpv4,
}

/// Reads JSON-lines access logs and yields the IPv4 `remote_addr` of each line.
///
/// Lines that are not JSON objects, have no `remote_addr`, or whose address is
/// not IPv4 are skipped and counted in [`IngestStats`]. Only I/O errors are
/// reported. Invalid UTF-8 is tolerated outside the JSON strings.
pub struct AccessLogReader<R: BufRead> {
    reader: R,
    line: Vec<u8>,
    stats: IngestStats,
}

impl<R: BufRead> AccessLogReader<R> {
    pub fn new(reader: R) -> Self {
        AccessLogReader {
            reader,
            line: Vec::new(),
            stats: IngestStats::default(),
        }
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    fn classify(line: &[u8]) -> Result<String, Skip> {
        let record: LogRecord = serde_json::from_slice(line).map_err(|_| Skip::Malformed)?;
        let addr = match record.remote_addr {
            Some(addr) if !addr.is_empty() => addr,
            _ => return Err(Skip::MissingAddress),
        };
        if addr.parse::<Ipv4Addr>().is_err() {
            return Err(Skip::NotIpv4);
        }
        Ok(addr)
    }
}

impl<R: BufRead> Iterator for AccessLogReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
            self.stats.lines += 1;

            match Self::classify(self.line.trim_ascii()) {
                Ok(addr) => {
                    self.stats.accepted += 1;
                    return Some(Ok(addr));
                }
                Err(Skip::Malformed) => self.stats.malformed += 1,
                Err(Skip::MissingAddress) => self.stats.missing_address += 1,
                Err(Skip::NotIpv4) => self.stats.not_ipv4 += 1,
            }
            debug!(line = self.stats.lines, "skipping access-log line");
        }
    }
}

/// Collects every IPv4 address in the log at `path`, in file order.
pub fn read_ipv4_addresses(path: impl AsRef<Path>) -> io::Result<(Vec<String>, IngestStats)> {
    let file = File::open(path.as_ref())?;
    let mut reader = AccessLogReader::new(BufReader::new(file));

    let mut addresses = Vec::new();
    for addr in reader.by_ref() {
        addresses.push(addr?);
    }

    let stats = reader.stats();
    info!(
        path = %path.as_ref().display(),
        lines = stats.lines,
        accepted = stats.accepted,
        skipped = stats.skipped(),
        "read access log"
    );
    Ok((addresses, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_extracts_ipv4_and_skips_the_rest() {
        let data = br#"{"remote_addr": "10.0.0.1", "status": 200}
not json at all
{"status": 404}
{"remote_addr": ""}
{"remote_addr": "2001:db8::1"}
{"remote_addr": "999.1.1.1"}

  {"remote_addr": "10.0.0.2"}
{"remote_addr": "10.0.0.1"}
"#;
        let mut reader = AccessLogReader::new(Cursor::new(&data[..]));
        let addrs: Vec<String> = reader.by_ref().map(|r| r.unwrap()).collect();

        assert_eq!(addrs, vec!["10.0.0.1", "10.0.0.2", "10.0.0.1"]);
        assert_eq!(
            reader.stats(),
            IngestStats {
                lines: 9,
                accepted: 3,
                malformed: 2,
                missing_address: 2,
                not_ipv4: 2,
            }
        );
    }

    #[test]
    fn test_tolerates_invalid_utf8_lines() {
        let mut data = b"{\"remote_addr\": \"1.2.3.4\"}\n".to_vec();
        data.extend_from_slice(&[0xff, 0xfe, b'\n']);
        data.extend_from_slice(b"{\"remote_addr\": \"5.6.7.8\"}");

        let mut reader = AccessLogReader::new(Cursor::new(data));
        let addrs: Vec<String> = reader.by_ref().map(|r| r.unwrap()).collect();
        assert_eq!(addrs, vec!["1.2.3.4", "5.6.7.8"]);
        assert_eq!(reader.stats().malformed, 1);
    }

    #[test]
    fn test_empty_input() {
        let mut reader = AccessLogReader::new(Cursor::new(Vec::new()));
        assert!(reader.next().is_none());
        assert_eq!(reader.stats(), IngestStats::default());
    }
}
