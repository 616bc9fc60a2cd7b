use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::category::CategoryVocabulary;
use super::moderation::ProfanityFilter;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoucherError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid expiry date '{0}', expected YYYY-MM-DD")]
    InvalidExpiryDate(String),
    #[error("Max uses must be a positive number, got {0}")]
    InvalidMaxUses(i64),
    #[error("Unknown category: '{0}'")]
    UnknownCategory(String),
    #[error("Field '{field}' contains inappropriate language")]
    Profanity { field: &'static str },
    #[error("Voucher is no longer active")]
    Inactive,
    #[error("Voucher expired on {0}")]
    Expired(NaiveDate),
    #[error("Voucher has reached its limit of {max_uses} uses")]
    UsageExhausted { max_uses: u32 },
}

/// Voucher fields as entered on the submit form, before any checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoucherDraft {
    pub merchant_name: String,
    pub voucher_code: String,
    pub description: Option<String>,
    pub discount_value: Option<String>,
    /// ISO `YYYY-MM-DD`.
    pub expiry_date: Option<String>,
    pub category: Option<String>,
    pub max_uses: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedVoucher {
    pub merchant_name: String,
    pub voucher_code: String,
    pub description: Option<String>,
    pub discount_value: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub max_uses: Option<u32>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Outcome of a successful redemption check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redemption {
    /// Uses left before this redemption; `None` when the voucher is unlimited.
    pub remaining_uses: Option<u32>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ValidatedVoucher {
    pub fn validate(
        draft: VoucherDraft,
        categories: &CategoryVocabulary,
        filter: &ProfanityFilter,
    ) -> Result<ValidatedVoucher, VoucherError> {
        let merchant_name = draft.merchant_name.trim().to_string();
        if merchant_name.is_empty() {
            return Err(VoucherError::MissingField("merchant_name"));
        }

        let voucher_code = draft.voucher_code.trim().to_uppercase();
        if voucher_code.is_empty() {
            return Err(VoucherError::MissingField("voucher_code"));
        }

        let description = non_blank(draft.description);
        let discount_value = non_blank(draft.discount_value);

        let expiry_date = match non_blank(draft.expiry_date) {
            Some(raw) => Some(
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| VoucherError::InvalidExpiryDate(raw))?,
            ),
            None => None,
        };

        let category = non_blank(draft.category);
        if let Some(c) = &category {
            if !categories.contains(c) {
                return Err(VoucherError::UnknownCategory(c.clone()));
            }
        }

        let max_uses = match draft.max_uses {
            Some(n) => Some(
                u32::try_from(n)
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or(VoucherError::InvalidMaxUses(n))?,
            ),
            None => None,
        };

        let screened: [(&'static str, Option<&str>); 4] = [
            ("merchant_name", Some(merchant_name.as_str())),
            ("voucher_code", Some(voucher_code.as_str())),
            ("description", description.as_deref()),
            ("discount_value", discount_value.as_deref()),
        ];
        for (field, value) in screened {
            if value.is_some_and(|v| filter.contains_profanity(v)) {
                return Err(VoucherError::Profanity { field });
            }
        }

        Ok(ValidatedVoucher {
            merchant_name,
            voucher_code,
            description,
            discount_value,
            expiry_date,
            category,
            max_uses,
            is_active: true,
        })
    }

    /// Whether the voucher can be used once more on `today`, given how many
    /// times it has already been redeemed. The expiry date itself is still valid.
    pub fn check_redeemable(&self, use_count: u32, today: NaiveDate) -> Result<Redemption, VoucherError> {
        if !self.is_active {
            return Err(VoucherError::Inactive);
        }
        if let Some(expiry) = self.expiry_date {
            if expiry < today {
                return Err(VoucherError::Expired(expiry));
            }
        }
        match self.max_uses {
            Some(max_uses) if use_count >= max_uses => Err(VoucherError::UsageExhausted { max_uses }),
            Some(max_uses) => Ok(Redemption { remaining_uses: Some(max_uses - use_count) }),
            None => Ok(Redemption { remaining_uses: None }),
        }
    }
}
