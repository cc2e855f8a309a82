//! File-to-parser router.
//!
//! Maps a file *name* (never a path) to the [`Dialect`] that should parse its
//! lines. Rules are tried in order and each pattern is anchored at the start
//! of the name only, so rotated and suffixed files (`cron.3`, `boot.log.1`)
//! route like their base name. A name no rule matches is simply not ours.

use crate::config::RuleConfig;
use crate::dialect::Dialect;
use crate::error::ConfigError;
use regex::Regex;

/// Built-in rules, in priority order.
pub const DEFAULT_RULES: &[(&str, Dialect)] = &[
    (r"boot\.log(\.\d+)?", Dialect::Syslog),
    (r"cron(\.\d+)?", Dialect::Syslog),
    (r"access\.log(\.\d+)?", Dialect::Proxy),
    (r"cache\.log(\.\d+)?", Dialect::Proxy),
    (r"referer_log\.log(\.\d+)?", Dialect::Proxy),
    (r"store\.log(\.\d+)?", Dialect::Proxy),
    (r"useragent_log\.log(\.\d+)?", Dialect::Proxy),
    (r"logfile", Dialect::Privoxy),
    (r"error_log(\.\d+)?", Dialect::Printer),
    (r"ssl_access_log(\.\d+)?", Dialect::WebAccess),
];

/// One `(pattern, dialect)` routing rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    source: String,
    dialect: Dialect,
}

impl Rule {
    /// Compile `pattern`, anchoring it at the start of the file name.
    pub fn new(pattern: &str, dialect: Dialect) -> Result<Self, ConfigError> {
        let anchored = format!("^(?:{pattern})");
        let compiled = Regex::new(&anchored).map_err(|source| ConfigError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: compiled,
            source: pattern.to_string(),
            dialect,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.source
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.pattern.is_match(file_name)
    }
}

/// Ordered rule set; the first matching rule wins.
#[derive(Debug, Clone)]
pub struct Router {
    rules: Vec<Rule>,
}

impl Router {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Built-in rules followed by configured extras.
    pub fn with_extra_rules(extra: &[RuleConfig]) -> Result<Self, ConfigError> {
        let mut router = Self::default();
        for rule in extra {
            let dialect: Dialect = rule.dialect.parse()?;
            router.rules.push(Rule::new(&rule.pattern, dialect)?);
        }
        Ok(router)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The dialect for `file_name`, or `None` when the file should be skipped.
    pub fn route(&self, file_name: &str) -> Option<Dialect> {
        self.rules
            .iter()
            .find(|rule| rule.matches(file_name))
            .map(Rule::dialect)
    }
}

impl Default for Router {
    fn default() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|(pattern, dialect)| {
                Rule::new(pattern, *dialect).expect("built-in router patterns must compile")
            })
            .collect();
        Self { rules }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
