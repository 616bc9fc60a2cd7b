//! Best-effort extraction of voucher fields from pasted or OCR'd text.
//!
//! Each field runs its own pipeline: labelled patterns first (`Merchant: …`,
//! `Code: …`), then a heuristic fallback when no label is present. The
//! extractor never fails; anything it cannot find comes back empty.

// Compiled-once regex for a constant pattern.
macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static regex::Regex {
            static R: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            R.get_or_init(|| regex::Regex::new($pat).expect("invalid regex"))
        }
    };
}

pub mod category;
pub mod config;
pub mod date;
pub mod extract;
pub mod fallback;
pub mod labels;
pub mod normalize;
pub mod types;

pub use config::{ConfigError, ExtractorConfig};
pub use extract::{extract_voucher_fields, Extractor};
pub use labels::{LabelField, LabelPatterns};
pub use normalize::normalize_lines;
pub use types::ExtractedVoucherFields;
