use std::fmt;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelField {
    Merchant,
    Code,
    Discount,
    Description,
    MaxUses,
}

impl fmt::Display for LabelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelField::Merchant => write!(f, "merchant"),
            LabelField::Code => write!(f, "code"),
            LabelField::Discount => write!(f, "discount"),
            LabelField::Description => write!(f, "description"),
            LabelField::MaxUses => write!(f, "max_uses"),
        }
    }
}

/// Ordered label patterns per field. Patterns are matched case-insensitively
/// against the whole text, and the value is taken from capture group 1.
/// Within a field the first pattern that captures something wins, regardless
/// of where in the text the other patterns would have matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelPatterns {
    pub merchant: Vec<String>,
    pub code: Vec<String>,
    pub discount: Vec<String>,
    pub description: Vec<String>,
    pub max_uses: Vec<String>,
}

impl Default for LabelPatterns {
    fn default() -> Self {
        fn owned(patterns: &[&str]) -> Vec<String> {
            patterns.iter().map(|p| p.to_string()).collect()
        }

        Self {
            merchant: owned(&[
                r"(?:merchant|store|shop|vendor|brand)\s*[:\-]\s*(.+)",
                r"(?:from)\s*[:\-]\s*(.+)",
            ]),
            code: owned(&[
                r"(?:voucher|coupon|promo|discount)\s*code\s*[:#\-]?\s*([A-Za-z0-9][A-Za-z0-9\-_]{3,})",
                r"(?-u:\b)code\s*[:#\-]?\s*([A-Za-z0-9][A-Za-z0-9\-_]{3,})",
            ]),
            discount: owned(&[r"(?:discount|offer|deal|save(?:\s*up\s*to)?)\s*[:\-]\s*(.+)"]),
            description: owned(&[r"(?:description|details|terms?)\s*[:\-]\s*(.+)"]),
            max_uses: owned(&[r"(?:max(?:imum)?\s*uses?|uses?)\s*[:\-]?\s*([0-9]{1,3})"]),
        }
    }
}

impl LabelPatterns {
    pub fn compile(&self) -> Result<CompiledLabels, ConfigError> {
        Ok(CompiledLabels {
            merchant: compile_field(LabelField::Merchant, &self.merchant)?,
            code: compile_field(LabelField::Code, &self.code)?,
            discount: compile_field(LabelField::Discount, &self.discount)?,
            description: compile_field(LabelField::Description, &self.description)?,
            max_uses: compile_field(LabelField::MaxUses, &self.max_uses)?,
        })
    }
}

fn compile_field(field: LabelField, patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            let re = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| ConfigError::InvalidPattern {
                    field,
                    pattern: pattern.clone(),
                    source,
                })?;
            // Group 0 is the whole match; the value lives in group 1.
            if re.captures_len() < 2 {
                return Err(ConfigError::MissingCaptureGroup { field, pattern: pattern.clone() });
            }
            Ok(re)
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct CompiledLabels {
    merchant: Vec<Regex>,
    code: Vec<Regex>,
    discount: Vec<Regex>,
    description: Vec<Regex>,
    max_uses: Vec<Regex>,
}

impl CompiledLabels {
    /// The built-in label set, compiled on first use.
    pub fn defaults() -> &'static CompiledLabels {
        static DEFAULTS: OnceLock<CompiledLabels> = OnceLock::new();
        DEFAULTS.get_or_init(|| {
            LabelPatterns::default()
                .compile()
                .expect("invalid default label pattern")
        })
    }

    pub fn merchant(&self, text: &str) -> Option<String> {
        find_first_match(text, &self.merchant)
    }

    pub fn code(&self, text: &str) -> Option<String> {
        find_first_match(text, &self.code)
    }

    pub fn discount(&self, text: &str) -> Option<String> {
        find_first_match(text, &self.discount)
    }

    pub fn description(&self, text: &str) -> Option<String> {
        find_first_match(text, &self.description)
    }

    /// Only positive counts are meaningful; zero reads as "not stated".
    pub fn max_uses(&self, text: &str) -> Option<u32> {
        find_first_match(text, &self.max_uses)?
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
    }
}

/// First non-empty capture across `patterns`, tried in order. A pattern whose
/// capture is only whitespace still ends the search.
fn find_first_match(text: &str, patterns: &[Regex]) -> Option<String> {
    let captured = patterns.iter().find_map(|re| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .filter(|m| !m.as_str().is_empty())
    })?;
    let value = captured.as_str().trim();
    (!value.is_empty()).then(|| value.to_string())
}
