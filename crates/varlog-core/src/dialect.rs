//! Dialect parsers: one pure function per supported log line format.
//!
//! Every parser takes a raw line and a [`ParseContext`] and returns either a
//! complete [`LogRecord`] (UTC timestamp, `raw` kept verbatim) or a
//! [`FormatMismatch`]. Nothing here reads the wall clock: dialects without a
//! year in their timestamps take it from [`ParseContext::assumed_year`].
//!
//! | Dialect | Files | Timestamp | App name |
//! |---------|-------|-----------|----------|
//! | `syslog` | `boot.log`, `cron` | `Mon DD HH:MM:SS`, assumed year, UTC | `app[pid]: ` prefix |
//! | `privoxy` | `logfile` | as syslog | `app: ` prefix |
//! | `proxy` | `access.log`, `cache.log`, ... | epoch / naive UTC / offset | `Squid` |
//! | `printer` | `error_log` | `DD/Mon/YYYY:HH:MM:SS -ZZZZ` | `CUPS` |
//! | `web-access` | `ssl_access_log` | as printer, assumed year | first request path segment |

use crate::detect::{self, ProxyFormat};
use crate::error::{ConfigError, FormatMismatch};
use crate::timestamp;
use crate::types::LogRecord;
use chrono::{DateTime, Utc};
use regex::{Captures, Regex};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// App name forced onto every proxy record.
pub const PROXY_APP: &str = "Squid";
/// App name forced onto every printer-subsystem record.
pub const PRINTER_APP: &str = "CUPS";

const MONTH: &str = "Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec";
const DAY: &str = "[0 ][1-9]|[12][0-9]|3[01]";
const YEAR: &str = "[12][0-9]{3}";
const TIME: &str = "(?:[01][0-9]|2[0-3]):[0-5][0-9]:[0-5][0-9]";

// ---------------------------------------------------------------------------
// Dialect
// ---------------------------------------------------------------------------

/// A recognised log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Unix syslog lines (`boot.log`, `cron`).
    Syslog,
    /// Privoxy's `logfile`: the syslog header without a bracketed pid.
    Privoxy,
    /// The proxy family; the sub-format is detected per line.
    Proxy,
    /// Printer subsystem `error_log`.
    Printer,
    /// Web server `ssl_access_log`.
    WebAccess,
}

impl Dialect {
    pub const ALL: [Dialect; 5] = [
        Dialect::Syslog,
        Dialect::Privoxy,
        Dialect::Proxy,
        Dialect::Printer,
        Dialect::WebAccess,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Syslog => "syslog",
            Dialect::Privoxy => "privoxy",
            Dialect::Proxy => "proxy",
            Dialect::Printer => "printer",
            Dialect::WebAccess => "web-access",
        }
    }

    /// Parse one raw line (without its terminator).
    pub fn parse(self, line: &str, ctx: &ParseContext) -> Result<LogRecord, FormatMismatch> {
        match self {
            Dialect::Syslog => parse_syslog(line, ctx),
            Dialect::Privoxy => parse_privoxy(line, ctx),
            Dialect::Proxy => parse_proxy(line),
            Dialect::Printer => parse_printer(line),
            Dialect::WebAccess => parse_web_access(line, ctx),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Dialect::ALL
            .into_iter()
            .find(|d| d.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownDialect(s.to_string()))
    }
}

/// Inputs a parser needs beyond the line itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseContext {
    /// Year given to timestamps that do not carry one. Archives that span a
    /// year boundary need this set per file by the caller.
    pub assumed_year: i32,
}

impl ParseContext {
    pub fn new(assumed_year: i32) -> Self {
        Self { assumed_year }
    }
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

fn syslog_header() -> String {
    format!(r"^(?P<month>{MONTH}) (?P<day>{DAY}) (?P<time>{TIME}) (?P<host>\S+) ")
}

static SYSLOG: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"{}(?:(?P<app>\S+)\[(?P<pid>\d+)\]: )?(?P<message>.*)$",
        syslog_header()
    );
    Regex::new(&pattern).expect("syslog pattern")
});

static PRIVOXY: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"{}(?:(?P<app>\S+): )?(?P<message>.*)$", syslog_header());
    Regex::new(&pattern).expect("privoxy pattern")
});

static PRINTER: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r#"(?i)^[a-z]+[\s\-]*\[(?P<ts>(?:{DAY})/(?:{MONTH})/{YEAR}:{TIME}\s-[0-9]{{4}})\](?P<message>[a-z0-9\s:"/,.\-]+)"#
    );
    Regex::new(&pattern).expect("printer pattern")
});

static WEB_ACCESS: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r#"^(?P<host>\S+) \S+ \S+ \[(?P<ts>(?:{DAY})/(?:{MONTH})/{YEAR}:{TIME} \S+)\] "(?P<message>.*)$"#
    );
    Regex::new(&pattern).expect("web access pattern")
});

static REQUEST_APP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"^[A-Za-z]+ /(?P<app>[^/\s?"#]+)"##).expect("request line pattern")
});

// ---------------------------------------------------------------------------
// Parsers
// ---------------------------------------------------------------------------

/// A named capture, or `None` when it did not participate or matched empty.
fn group<'h>(caps: &Captures<'h>, name: &str) -> Option<&'h str> {
    caps.name(name).map(|m| m.as_str()).filter(|m| !m.is_empty())
}

fn parse_syslog(line: &str, ctx: &ParseContext) -> Result<LogRecord, FormatMismatch> {
    let mismatch = || FormatMismatch::new(Dialect::Syslog, line);
    let caps = SYSLOG.captures(line).ok_or_else(mismatch)?;
    let timestamp = syslog_timestamp(&caps, ctx).ok_or_else(mismatch)?;
    let process_id = match group(&caps, "pid") {
        Some(pid) => Some(pid.parse::<u32>().map_err(|_| mismatch())?),
        None => None,
    };

    Ok(LogRecord::new(timestamp, line)
        .with_host_name(group(&caps, "host"))
        .with_app_name(group(&caps, "app"))
        .with_process_id(process_id)
        .with_message(group(&caps, "message")))
}

fn parse_privoxy(line: &str, ctx: &ParseContext) -> Result<LogRecord, FormatMismatch> {
    let mismatch = || FormatMismatch::new(Dialect::Privoxy, line);
    let caps = PRIVOXY.captures(line).ok_or_else(mismatch)?;
    let timestamp = syslog_timestamp(&caps, ctx).ok_or_else(mismatch)?;

    Ok(LogRecord::new(timestamp, line)
        .with_host_name(group(&caps, "host"))
        .with_app_name(group(&caps, "app"))
        .with_message(group(&caps, "message")))
}

fn syslog_timestamp(caps: &Captures<'_>, ctx: &ParseContext) -> Option<DateTime<Utc>> {
    timestamp::from_syslog(
        group(caps, "month")?,
        group(caps, "day")?,
        group(caps, "time")?,
        ctx.assumed_year,
    )
}

fn parse_proxy(line: &str) -> Result<LogRecord, FormatMismatch> {
    let mismatch = || FormatMismatch::new(Dialect::Proxy, line);
    let (format, caps) = detect::match_proxy(line).ok_or_else(mismatch)?;
    let ts = group(&caps, "ts").ok_or_else(mismatch)?;

    let timestamp = match format {
        ProxyFormat::Access | ProxyFormat::Referer | ProxyFormat::Store => {
            timestamp::from_epoch(ts)
        }
        ProxyFormat::Cache => timestamp::from_naive_utc(ts, timestamp::CACHE_FORMAT),
        ProxyFormat::UserAgent => timestamp::from_offset(ts, timestamp::OFFSET_FORMAT),
    }
    .ok_or_else(mismatch)?;

    // The access log's elapsed-time column has no home in the record, so it
    // is kept at the front of the message.
    let message = match (format, group(&caps, "elapsed"), group(&caps, "message")) {
        (ProxyFormat::Access, Some(elapsed), Some(rest)) => Some(format!("{elapsed} {rest}")),
        (_, _, rest) => rest.map(str::to_string),
    };

    Ok(LogRecord::new(timestamp, line)
        .with_host_name(group(&caps, "host"))
        .with_app_name(Some(PROXY_APP))
        .with_message(message))
}

fn parse_printer(line: &str) -> Result<LogRecord, FormatMismatch> {
    let mismatch = || FormatMismatch::new(Dialect::Printer, line);
    let caps = PRINTER.captures(line).ok_or_else(mismatch)?;
    let ts = group(&caps, "ts").ok_or_else(mismatch)?;
    let timestamp = timestamp::from_offset(ts, timestamp::OFFSET_FORMAT).ok_or_else(mismatch)?;
    let message = group(&caps, "message")
        .map(str::trim_start)
        .filter(|m| !m.is_empty());

    Ok(LogRecord::new(timestamp, line)
        .with_app_name(Some(PRINTER_APP))
        .with_message(message))
}

fn parse_web_access(line: &str, ctx: &ParseContext) -> Result<LogRecord, FormatMismatch> {
    let mismatch = || FormatMismatch::new(Dialect::WebAccess, line);
    let caps = WEB_ACCESS.captures(line).ok_or_else(mismatch)?;
    let ts = group(&caps, "ts").ok_or_else(mismatch)?;
    let timestamp =
        timestamp::from_offset_in_year(ts, timestamp::OFFSET_FORMAT, ctx.assumed_year)
            .ok_or_else(mismatch)?;
    let message = group(&caps, "message");
    let app_name = message.and_then(request_app);

    Ok(LogRecord::new(timestamp, line)
        .with_host_name(group(&caps, "host"))
        .with_app_name(app_name)
        .with_message(message))
}

/// First path segment of a request line: `GET /webmail/src/login.php HTTP/1.1`
/// gives `webmail`.
fn request_app(request: &str) -> Option<&str> {
    REQUEST_APP
        .captures(request)
        .and_then(|caps| caps.name("app"))
        .map(|m| m.as_str())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
