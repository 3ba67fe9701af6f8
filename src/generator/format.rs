//! File naming formats.
//!
//! A format is written as a sample spelling of the two words `go` and `zero`:
//! the casing of each word and the text between them describe how an identifier
//! is rendered as a file name.
//!
//! | format    | `listHandler`  |
//! |-----------|----------------|
//! | `gozero`  | `listhandler`  |
//! | `go_zero` | `list_handler` |
//! | `goZero`  | `listHandler`  |
//! | `GoZero`  | `ListHandler`  |
//! | `GO-ZERO` | `LIST-HANDLER` |

use super::casing::split_words;
use crate::error::GenError;
use std::fmt;
use std::str::FromStr;

/// Naming format used when no format is configured.
pub const DEFAULT_NAMING_FORMAT: &str = "gozero";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordStyle {
    Lower,
    Upper,
    Title,
}

impl WordStyle {
    fn detect(flag: &str, word: &str, format: &str) -> Result<Self, GenError> {
        let lower = word.to_ascii_lowercase();
        let upper = word.to_ascii_uppercase();
        let titled = super::casing::title(&lower);
        if flag == lower {
            Ok(WordStyle::Lower)
        } else if flag == upper {
            Ok(WordStyle::Upper)
        } else if flag == titled {
            Ok(WordStyle::Title)
        } else {
            Err(GenError::Configuration {
                format: format.to_string(),
                reason: format!("'{flag}' must be spelled {lower}, {upper} or {titled}"),
            })
        }
    }

    fn apply(self, word: &str) -> String {
        match self {
            WordStyle::Lower => word.to_lowercase(),
            WordStyle::Upper => word.to_uppercase(),
            WordStyle::Title => super::casing::title(&word.to_lowercase()),
        }
    }
}

/// A validated file naming format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingFormat {
    raw: String,
    before: String,
    separator: String,
    after: String,
    first: WordStyle,
    rest: WordStyle,
}

impl NamingFormat {
    /// Parse and validate a naming format such as `go_zero`.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Configuration`] when the format does not contain `go`
    /// followed by `zero`, when either word uses mixed casing, or when the
    /// surrounding text contains letters or digits.
    pub fn parse(format: &str) -> Result<Self, GenError> {
        let bad = |reason: &str| GenError::Configuration {
            format: format.to_string(),
            reason: reason.to_string(),
        };
        if !format.is_ascii() {
            return Err(bad("only ASCII formats are supported"));
        }
        let upper = format.to_ascii_uppercase();
        let (go, zero) = match (upper.find("GO"), upper.find("ZERO")) {
            (Some(go), Some(zero)) if go + 2 <= zero => (go, zero),
            _ => return Err(bad("expected the words 'go' and 'zero' in that order")),
        };

        let before = &format[..go];
        let separator = &format[go + 2..zero];
        let after = &format[zero + 4..];
        if [before, separator, after]
            .iter()
            .any(|part| part.chars().any(|c| c.is_ascii_alphanumeric()))
        {
            return Err(bad("only punctuation may surround 'go' and 'zero'"));
        }

        Ok(Self {
            raw: format.to_string(),
            before: before.to_string(),
            separator: separator.to_string(),
            after: after.to_string(),
            first: WordStyle::detect(&format[go..go + 2], "go", format)?,
            rest: WordStyle::detect(&format[zero..zero + 4], "zero", format)?,
        })
    }

    /// Render an identifier as a file stem (no extension).
    pub fn apply(&self, content: &str) -> String {
        let mut out = self.before.clone();
        for (i, word) in split_words(content).iter().enumerate() {
            if i == 0 {
                out.push_str(&self.first.apply(word));
            } else {
                out.push_str(&self.separator);
                out.push_str(&self.rest.apply(word));
            }
        }
        out.push_str(&self.after);
        out
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Default for NamingFormat {
    fn default() -> Self {
        Self {
            raw: DEFAULT_NAMING_FORMAT.to_string(),
            before: String::new(),
            separator: String::new(),
            after: String::new(),
            first: WordStyle::Lower,
            rest: WordStyle::Lower,
        }
    }
}

impl FromStr for NamingFormat {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NamingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
