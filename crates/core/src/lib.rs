pub mod category;
pub mod moderation;
pub mod voucher;

pub use category::{CategoryVocabulary, DEFAULT_VOUCHER_CATEGORIES};
pub use moderation::{ModerationConfig, ProfanityFilter};
pub use voucher::{Redemption, ValidatedVoucher, VoucherDraft, VoucherError};
