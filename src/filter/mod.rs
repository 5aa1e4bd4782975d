mod error;

pub use error::FilterError;

use regex::Regex;

/// Compiled grep and reverse-grep patterns.
///
/// Blank patterns are skipped at compile time, so the empty sentinel pushed
/// by unset `-g`/`-r` flags never filters anything.
#[derive(Debug, Default)]
pub struct LineFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl LineFilter {
    pub fn new(grep: &[String], reverse_grep: &[String]) -> Result<Self, FilterError> {
        Ok(Self {
            include: compile(grep)?,
            exclude: compile(reverse_grep)?,
        })
    }

    pub fn is_passthrough(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    pub fn keep(&self, line: &str) -> bool {
        if self.exclude.iter().any(|re| re.is_match(line)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|re| re.is_match(line))
    }

    pub fn apply<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.lines().filter(|line| self.keep(line)).collect()
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Regex>, FilterError> {
    patterns
        .iter()
        .filter(|p| !p.trim().is_empty())
        .map(|p| {
            Regex::new(p).map_err(|e| FilterError::InvalidPattern {
                pattern: p.clone(),
                source: e,
            })
        })
        .collect()
}
