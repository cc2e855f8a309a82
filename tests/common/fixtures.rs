//! Static log corpora used across harnesses.
//!
//! Each corpus is a `&'static [&'static str]` of lines in one dialect, all
//! of which parse with [`YEAR`](super::YEAR) as the assumed year. Expected
//! values in the harnesses are written against these exact lines.

use super::builders::LogTree;
use tempfile::TempDir;

/// `cron`: syslog lines with `app[pid]: `.
pub const CORPUS_CRON: &[&str] = &[
    "Feb 28 04:02:01 hnet crond[4242]: (root) CMD (run-parts /etc/cron.daily)",
    "Feb 28 12:00:01 hnet crond[4301]: (root) CMD (run-parts /etc/cron.hourly)",
    "Mar  1 00:10:00 hnet crond[4400]: (root) CMD (/usr/lib/sa/sa1 1 1)",
];

/// `cron.1`: the rotated day before.
pub const CORPUS_CRON_ROTATED: &[&str] =
    &["Feb 27 04:02:01 hnet crond[4100]: (root) CMD (run-parts /etc/cron.daily)"];

/// `boot.log`: syslog lines, two without a bracketed pid.
pub const CORPUS_BOOT: &[&str] = &[
    "Feb 27 23:59:58 hnet syslogd 1.4.1: restart.",
    "Feb 27 23:59:59 hnet kernel: Linux version 2.6.9-34.EL",
    "Feb 28 00:00:05 hnet network[2101]: Bringing up loopback interface:  succeeded",
];

/// Privoxy `logfile`.
pub const CORPUS_PRIVOXY: &[&str] = &[
    "Feb 28 10:15:00 hnet privoxy: Privoxy version 3.0.3",
    "Feb 28 10:15:01 hnet Privoxy: Listening on port 8118",
];

/// `access.log`: epoch, elapsed, client.
pub const CORPUS_PROXY_ACCESS: &[&str] = &[
    "1141120800.000 5 10.0.0.1 TCP_MISS/200 1024 GET http://example.com/ - DIRECT/93.184.216.34 text/html",
    "1141124400.123 42 10.0.0.2 TCP_HIT/200 512 GET http://example.com/logo.png - NONE/- image/png",
];

/// `cache.log`: naive UTC timestamps.
pub const CORPUS_PROXY_CACHE: &[&str] = &[
    "2006/02/28 09:00:00| Starting Squid Cache version 2.5.STABLE6 for i686-redhat-linux-gnu...",
    "2006/02/28 09:00:01| Process ID 2345",
];

/// `referer_log.log`.
pub const CORPUS_PROXY_REFERER: &[&str] =
    &["1141124400.500 10.0.0.1 http://example.com/index.html http://example.com/logo.png"];

/// `useragent_log.log`: bracketed offset timestamps.
pub const CORPUS_PROXY_USERAGENT: &[&str] =
    &["10.0.0.1 [28/Feb/2006:12:00:00 -0500] \"Mozilla/5.0 (X11; U; Linux i686)\""];

/// `store.log`.
pub const CORPUS_PROXY_STORE: &[&str] = &[
    "1141124400.750 RELEASE -1 FFFFFFFF 9B3E5A4C 200 1141124400 -1 -1 text/html 1024/1024 GET http://example.com/",
];

/// Printer subsystem `error_log`.
pub const CORPUS_PRINTER: &[&str] = &[
    "I [28/Feb/2006:08:00:00 -0500] Listening to 0:631",
    "E [28/Feb/2006:08:05:00 -0500] Unable to open \"/dev/lp0\" - no such device",
];

/// Web server `ssl_access_log`.
pub const CORPUS_WEB_ACCESS: &[&str] = &[
    "10.0.0.7 - - [28/Feb/2006:12:00:00 -0500] \"GET /webmail/src/login.php HTTP/1.1\" 200 1024",
    "10.0.0.8 - - [01/Mar/2006:09:30:00 -0500] \"POST /webmail/src/redirect.php HTTP/1.1\" 302 -",
];

/// Lines no dialect accepts.
pub const CORPUS_MALFORMED: &[&str] = &[
    "Feb 28 12:0",
    "-- MARK --",
    "28/Feb/2006 12:00:00 something happened",
    "E [28/Feb/2006:12:00:00 +0100] positive offset",
];

/// Records in [`sample_tree`].
pub const SAMPLE_RECORDS: usize = 20;
/// Routed files in [`sample_tree`].
pub const SAMPLE_FILES: usize = 11;

/// A full archive: every dialect, a rotated file, nested directories, and
/// two files no rule claims.
pub fn sample_tree() -> TempDir {
    LogTree::new()
        .lines("boot.log", CORPUS_BOOT)
        .lines("cron", CORPUS_CRON)
        .lines("cron.1", CORPUS_CRON_ROTATED)
        .lines("squid/access.log", CORPUS_PROXY_ACCESS)
        .lines("squid/cache.log", CORPUS_PROXY_CACHE)
        .lines("squid/referer_log.log", CORPUS_PROXY_REFERER)
        .lines("squid/useragent_log.log", CORPUS_PROXY_USERAGENT)
        .lines("squid/store.log", CORPUS_PROXY_STORE)
        .lines("privoxy/logfile", CORPUS_PRIVOXY)
        .lines("cups/error_log", CORPUS_PRINTER)
        .lines("httpd/ssl_access_log", CORPUS_WEB_ACCESS)
        .lines("README", &["not a log"])
        .lines("maillog", &["Feb 28 12:00:00 hnet sendmail[1]: unrouted"])
        .build()
}
