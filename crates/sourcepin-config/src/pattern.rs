//! Shell-style glob patterns for package names
//!
//! Supported syntax: `*` matches any run of characters, `?` matches exactly
//! one character, `[...]` matches one character from a class (`[a-z]`,
//! `[!abc]` for negation). A `]` directly after the opening `[` or `[!` is
//! part of the class, and a `[` without a closing `]` is a literal. Matching
//! is case-sensitive and covers the whole name.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// A glob that could not be turned into a matcher
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid glob pattern '{pattern}': {message}")]
pub struct PatternError {
    pub pattern: String,
    pub message: String,
}

/// A glob pattern matched against package names
///
/// The matcher is compiled the first time the pattern is used, so an invalid
/// pattern only fails when a lookup actually reaches it.
#[derive(Clone)]
pub struct NamePattern {
    pattern: String,
    compiled: OnceLock<Result<Regex, PatternError>>,
}

impl NamePattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            compiled: OnceLock::new(),
        }
    }

    /// The pattern as written in the configuration
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Check whether `name` matches this pattern
    pub fn matches(&self, name: &str) -> Result<bool, PatternError> {
        match self.compiled.get_or_init(|| compile(&self.pattern)) {
            Ok(regex) => Ok(regex.is_match(name)),
            Err(e) => Err(e.clone()),
        }
    }
}

impl fmt::Debug for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NamePattern").field(&self.pattern).finish()
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for NamePattern {}

fn compile(pattern: &str) -> Result<Regex, PatternError> {
    Regex::new(&translate(pattern)).map_err(|e| PatternError {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Translate a glob into an anchored regular expression
fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from(r"(?s)\A");
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;

        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => {
                // Locate the closing bracket, honouring a leading `!` and `]`
                let mut j = i;
                if j < chars.len() && chars[j] == '!' {
                    j += 1;
                }
                if j < chars.len() && chars[j] == ']' {
                    j += 1;
                }
                while j < chars.len() && chars[j] != ']' {
                    j += 1;
                }

                if j >= chars.len() {
                    out.push_str(r"\[");
                    continue;
                }

                let mut start = i;
                out.push('[');
                if chars[start] == '!' {
                    out.push('^');
                    start += 1;
                }
                push_class(&mut out, &chars[start..j]);
                out.push(']');
                i = j + 1;
            }
            _ => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
            }
        }
    }

    out.push_str(r"\z");
    out
}

/// Emit the members of a bracket class
///
/// `a-b` is a range; any other `-` is literal. Special members are escaped so
/// the regex set operators (`--`, `&&`, `~~`) can never form.
fn push_class(out: &mut String, members: &[char]) {
    let mut k = 0;
    while k < members.len() {
        push_class_char(out, members[k]);
        if k + 2 < members.len() && members[k + 1] == '-' {
            out.push('-');
            push_class_char(out, members[k + 2]);
            k += 3;
        } else {
            k += 1;
        }
    }
}

fn push_class_char(out: &mut String, ch: char) {
    if matches!(ch, '\\' | '[' | ']' | '^' | '&' | '~' | '-') {
        out.push('\\');
    }
    out.push(ch);
}
