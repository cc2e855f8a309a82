//! Format detector for the proxy log family.
//!
//! The proxy writes five line shapes (access, cache, referer, user-agent,
//! store) and a rotated file name does not always say which one a line is.
//! The patterns overlap: `store` accepts anything that starts with an epoch,
//! so it is tried last, after every shape with more specific fields.

use crate::dialect::Dialect;
use crate::error::FormatMismatch;
use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

/// One proxy sub-format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyFormat {
    /// `<epoch.frac> <elapsed-ms> <host> <message>`
    Access,
    /// `<YYYY/MM/DD HH:MM:SS>| <message>`
    Cache,
    /// `<epoch.frac> <host> <http(s)...>`
    Referer,
    /// `<host> [<DD/Mon/YYYY:HH:MM:SS ±ZZZZ>] "<message>"`
    UserAgent,
    /// `<epoch.frac> <message>`
    Store,
}

impl ProxyFormat {
    /// Detection order, most specific first.
    pub const PRIORITY: [ProxyFormat; 5] = [
        ProxyFormat::Access,
        ProxyFormat::Cache,
        ProxyFormat::Referer,
        ProxyFormat::UserAgent,
        ProxyFormat::Store,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            ProxyFormat::Access => &ACCESS,
            ProxyFormat::Cache => &CACHE,
            ProxyFormat::Referer => &REFERER,
            ProxyFormat::UserAgent => &USER_AGENT,
            ProxyFormat::Store => &STORE,
        }
    }
}

impl fmt::Display for ProxyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyFormat::Access => write!(f, "access"),
            ProxyFormat::Cache => write!(f, "cache"),
            ProxyFormat::Referer => write!(f, "referer"),
            ProxyFormat::UserAgent => write!(f, "useragent"),
            ProxyFormat::Store => write!(f, "store"),
        }
    }
}

static ACCESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<ts>\d+\.\d+)\s+(?P<elapsed>\d+)\s+(?P<host>\S+)\s+(?P<message>.*)$")
        .expect("access pattern")
});

static CACHE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<ts>\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2})\|\s(?P<message>.*)$")
        .expect("cache pattern")
});

static REFERER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<ts>\d+\.\d+)\s(?P<host>\S+)\s(?P<message>(?:http|https).*)$")
        .expect("referer pattern")
});

static USER_AGENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?P<host>\S+)\s+\[(?P<ts>.*)\]\s"(?P<message>.*)"$"#)
        .expect("useragent pattern")
});

static STORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<ts>\d+\.\d+)\s+(?P<message>.*)$").expect("store pattern")
});

/// Classify a proxy line by the first sub-format, in [`ProxyFormat::PRIORITY`]
/// order, whose pattern matches.
pub fn detect_proxy(line: &str) -> Result<ProxyFormat, FormatMismatch> {
    match_proxy(line)
        .map(|(format, _)| format)
        .ok_or_else(|| FormatMismatch::new(Dialect::Proxy, line))
}

/// Detection plus the captures of the winning pattern, so the extractor
/// does not match twice.
pub(crate) fn match_proxy(line: &str) -> Option<(ProxyFormat, Captures<'_>)> {
    ProxyFormat::PRIORITY
        .iter()
        .find_map(|format| format.pattern().captures(line).map(|caps| (*format, caps)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::access(
        "1141124400.123    42 10.0.0.1 TCP_MISS/200 512 GET http://example.com/ - DIRECT/1.2.3.4 text/html",
        ProxyFormat::Access
    )]
    #[case::access_short("123456.789 42 10.0.0.1 GET /x", ProxyFormat::Access)]
    #[case::cache("2006/02/28 12:00:00| Starting Squid Cache version 2.5", ProxyFormat::Cache)]
    #[case::referer(
        "1141124400.123 10.0.0.1 http://example.com/index.html http://example.com/logo.png",
        ProxyFormat::Referer
    )]
    #[case::useragent(
        "10.0.0.1 [28/Feb/2006:12:00:00 -0500] \"Mozilla/5.0 (X11; Linux)\"",
        ProxyFormat::UserAgent
    )]
    #[case::store(
        "1141124400.123 RELEASE -1 FFFFFFFF 3A1B2C text/html -1/0 GET http://example.com/",
        ProxyFormat::Store
    )]
    fn detects_each_sub_format(#[case] line: &str, #[case] expected: ProxyFormat) {
        assert_eq!(detect_proxy(line), Ok(expected));
    }

    #[test]
    fn access_wins_over_store() {
        let line = "123456.789 42 10.0.0.1 GET /x";
        assert!(STORE.is_match(line), "store must also accept the line");
        assert_eq!(detect_proxy(line), Ok(ProxyFormat::Access));
    }

    #[test]
    fn referer_wins_over_store() {
        let line = "1141124400.5 10.0.0.1 https://example.com/";
        assert!(STORE.is_match(line));
        assert_eq!(detect_proxy(line), Ok(ProxyFormat::Referer));
    }

    #[test]
    fn unmatched_line_is_a_mismatch() {
        let err = detect_proxy("not a proxy line").unwrap_err();
        assert_eq!(err.dialect, Dialect::Proxy);
        assert_eq!(err.line, "not a proxy line");
    }

    #[test]
    fn integer_epoch_is_not_enough() {
        assert!(detect_proxy("1141124400 RELEASE").is_err());
    }
}
