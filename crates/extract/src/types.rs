use serde::{Deserialize, Serialize};
use voucherdrop_core::VoucherDraft;

/// Suggested voucher fields. Absent values are empty strings (or `None` for
/// `max_uses`), so the record can be dropped straight into a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedVoucherFields {
    pub merchant_name: String,
    /// Always upper-case.
    pub voucher_code: String,
    pub description: String,
    pub discount_value: String,
    /// `YYYY-MM-DD`, always a real calendar date, or empty.
    pub expiry_date: String,
    /// A member of the vocabulary the extractor was given, or empty.
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
}

impl ExtractedVoucherFields {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fill the blank fields of a draft with suggestions. Anything the user
    /// already typed is left alone.
    pub fn prefill(&self, draft: &mut VoucherDraft) {
        fn fill(slot: &mut String, suggestion: &str) {
            if slot.trim().is_empty() && !suggestion.is_empty() {
                *slot = suggestion.to_string();
            }
        }

        fn fill_opt(slot: &mut Option<String>, suggestion: &str) {
            let blank = slot.as_deref().map_or(true, |v| v.trim().is_empty());
            if blank && !suggestion.is_empty() {
                *slot = Some(suggestion.to_string());
            }
        }

        fill(&mut draft.merchant_name, &self.merchant_name);
        fill(&mut draft.voucher_code, &self.voucher_code);
        fill_opt(&mut draft.description, &self.description);
        fill_opt(&mut draft.discount_value, &self.discount_value);
        fill_opt(&mut draft.expiry_date, &self.expiry_date);
        fill_opt(&mut draft.category, &self.category);
        if draft.max_uses.is_none() {
            draft.max_uses = self.max_uses.map(i64::from);
        }
    }
}
