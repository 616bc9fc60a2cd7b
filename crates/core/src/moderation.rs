use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Words rejected in user-submitted voucher text.
const DEFAULT_BLOCKED_WORDS: &[&str] = &[
    "arse", "arsehole", "ass", "asshole", "bastard", "bitch", "bollocks", "bullshit",
    "crap", "cunt", "damn", "dick", "dickhead", "douche", "fuck", "fucker", "fucking",
    "goddamn", "hell", "motherfucker", "piss", "prick", "pussy", "shit", "shitty",
    "slut", "twat", "wanker", "whore",
];

/// Compiled-size cap for the word alternation.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Adjustments to the built-in word list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModerationConfig {
    /// Additional words to block.
    pub extra_words: Vec<String>,
    /// Words removed from the block list.
    pub allowed_words: Vec<String>,
}

/// Whole-word, case-insensitive profanity detector.
#[derive(Debug, Clone)]
pub struct ProfanityFilter {
    pattern: Option<Regex>,
}

impl ProfanityFilter {
    pub fn new(config: &ModerationConfig) -> Self {
        let allowed: Vec<String> = config.allowed_words.iter().map(|w| w.to_lowercase()).collect();

        let words: Vec<String> = DEFAULT_BLOCKED_WORDS
            .iter()
            .map(|w| w.to_string())
            .chain(config.extra_words.iter().map(|w| w.trim().to_lowercase()))
            .filter(|w| !w.is_empty() && !allowed.contains(w))
            .map(|w| regex::escape(&w))
            .collect();

        if words.is_empty() {
            return Self { pattern: None };
        }

        let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b", words.join("|")))
            .case_insensitive(true)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build();
        match pattern {
            Ok(re) => Self { pattern: Some(re) },
            Err(error) => {
                tracing::warn!(
                    %error,
                    words = words.len(),
                    "profanity word list failed to compile; moderation disabled"
                );
                Self { pattern: None }
            }
        }
    }

    /// False when the word list was empty or failed to compile.
    pub fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    pub fn contains_profanity(&self, value: &str) -> bool {
        self.pattern.as_ref().is_some_and(|re| re.is_match(value))
    }
}

impl Default for ProfanityFilter {
    fn default() -> Self {
        Self::new(&ModerationConfig::default())
    }
}
