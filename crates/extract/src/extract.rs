use tracing::debug;
use voucherdrop_core::CategoryVocabulary;

use crate::category::pick_category;
use crate::config::{ConfigError, ExtractorConfig};
use crate::date::extract_date;
use crate::fallback;
use crate::labels::CompiledLabels;
use crate::normalize::{normalize_lines, sanitize};
use crate::types::ExtractedVoucherFields;

// ── Public extraction API ─────────────────────────────────────────────────────

/// Voucher field extractor bound to a label set and category vocabulary.
/// Immutable once built; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Extractor {
    labels: CompiledLabels,
    categories: CategoryVocabulary,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            labels: config.labels.compile()?,
            categories: config.categories,
        })
    }

    /// Built-in label patterns with a caller-supplied vocabulary.
    pub fn with_categories(categories: CategoryVocabulary) -> Self {
        Self {
            labels: CompiledLabels::defaults().clone(),
            categories,
        }
    }

    pub fn categories(&self) -> &CategoryVocabulary {
        &self.categories
    }

    /// Extract structured voucher fields from raw pasted or OCR text.
    pub fn extract(&self, raw_text: &str) -> ExtractedVoucherFields {
        run(raw_text, &self.labels, &self.categories)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::with_categories(CategoryVocabulary::default())
    }
}

/// One-shot extraction with the built-in label patterns.
pub fn extract_voucher_fields(raw_text: &str, categories: &CategoryVocabulary) -> ExtractedVoucherFields {
    run(raw_text, CompiledLabels::defaults(), categories)
}

fn run(raw_text: &str, labels: &CompiledLabels, categories: &CategoryVocabulary) -> ExtractedVoucherFields {
    let text = sanitize(raw_text);
    let lines = normalize_lines(&text);

    let merchant_name = pick("merchant_name", labels.merchant(&text), || fallback::merchant(&lines));
    let voucher_code = pick("voucher_code", labels.code(&text), || fallback::code(&text)).to_uppercase();
    let discount_value = pick("discount_value", labels.discount(&text), || fallback::discount(&text));
    let description = labels.description(&text).unwrap_or_default();
    let max_uses = labels.max_uses(&text);

    let expiry_date = extract_date(&text)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let category = pick_category(&text, categories).unwrap_or_default().to_string();

    debug!(
        lines = lines.len(),
        has_expiry = !expiry_date.is_empty(),
        has_category = !category.is_empty(),
        has_max_uses = max_uses.is_some(),
        "voucher fields extracted"
    );

    ExtractedVoucherFields {
        merchant_name,
        voucher_code,
        description,
        discount_value,
        expiry_date,
        category,
        max_uses,
    }
}

/// Label value if present, otherwise the fallback (evaluated lazily).
fn pick(field: &'static str, labelled: Option<String>, fallback: impl FnOnce() -> Option<String>) -> String {
    if let Some(value) = labelled {
        debug!(field, strategy = "label", "field matched");
        return value;
    }
    match fallback() {
        Some(value) => {
            debug!(field, strategy = "fallback", "field matched");
            value
        }
        None => String::new(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
