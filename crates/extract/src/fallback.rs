//! Heuristics used for a field only when none of its label patterns matched.

re!(re_merchant_noise,
    r"(?i)voucher|coupon|promo|discount|expiry|expires|valid|code|offer|receipt");
re!(re_code_token,
    r"(?-u:\b)[A-Z0-9][A-Z0-9\-_]{5,20}(?-u:\b)");
re!(re_embedded_date,
    r"[0-9]{4}[\-/.][0-9]{1,2}[\-/.][0-9]{1,2}");
re!(re_percent_off,
    r"(?i)(?-u:\b)[0-9]{1,3}\s?%\s*(?:off|discount)?(?-u:\b)");
re!(re_amount_off,
    r"(?i)(?:\$|₹|€|£)\s?[0-9]+(?:\.[0-9]{1,2})?\s*(?:off|discount)?(?-u:\b)");

/// First short standalone line that carries no voucher vocabulary.
pub fn merchant(lines: &[String]) -> Option<String> {
    lines
        .iter()
        .find(|line| {
            let len = line.chars().count();
            (3..=60).contains(&len) && !re_merchant_noise().is_match(line)
        })
        .cloned()
}

/// First upper-case token that is neither all digits nor carrying a
/// `YYYY-MM-DD`-style date.
pub fn code(text: &str) -> Option<String> {
    re_code_token()
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|candidate| {
            !candidate.chars().all(|c| c.is_ascii_digit()) && !re_embedded_date().is_match(candidate)
        })
        .map(str::to_string)
}

/// A percentage if there is one, otherwise a currency amount.
pub fn discount(text: &str) -> Option<String> {
    re_percent_off()
        .find(text)
        .or_else(|| re_amount_off().find(text))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_lines;

    // ── Merchant ──────────────────────────────────────────────────────────────

    #[test]
    fn merchant_skips_voucher_vocabulary_and_short_lines() {
        let lines = normalize_lines("Your COUPON\nAB\nPizza Palace\nDowntown");
        assert_eq!(merchant(&lines), Some("Pizza Palace".to_string()));
    }

    #[test]
    fn merchant_vocabulary_is_substring_match() {
        let lines = normalize_lines("Codeine Pharmacy\nCorner Chemist");
        assert_eq!(merchant(&lines), Some("Corner Chemist".to_string()));
    }

    #[test]
    fn merchant_skips_long_lines() {
        let long = "x".repeat(61);
        let lines = normalize_lines(&format!("{long}\nShort Shop"));
        assert_eq!(merchant(&lines), Some("Short Shop".to_string()));
    }

    #[test]
    fn merchant_length_bounds_are_inclusive() {
        let lines = normalize_lines("ab\nabc");
        assert_eq!(merchant(&lines), Some("abc".to_string()));

        let sixty = "x".repeat(60);
        let lines = normalize_lines(&format!("{}\n{sixty}\nShort Shop", "y".repeat(61)));
        assert_eq!(merchant(&lines), Some(sixty));
    }

    #[test]
    fn merchant_length_counts_characters() {
        let lines = normalize_lines("Café");
        assert_eq!(merchant(&lines), Some("Café".to_string()));
    }

    #[test]
    fn merchant_none_when_every_line_is_noise() {
        let lines = normalize_lines("Voucher\nValid till Friday\nOK");
        assert_eq!(merchant(&lines), None);
    }

    // ── Code ──────────────────────────────────────────────────────────────────

    #[test]
    fn code_finds_upper_case_token() {
        assert_eq!(code("Show SUMMER-SALE-25 at checkout"), Some("SUMMER-SALE-25".to_string()));
    }

    #[test]
    fn code_skips_dates_and_pure_numbers() {
        assert_eq!(code("2024-05-12 20240512\nGIFT-ABC123"), Some("GIFT-ABC123".to_string()));
    }

    #[test]
    fn code_none_for_date_only_text() {
        assert_eq!(code("Thank you\n2024-05-12"), None);
    }

    #[test]
    fn code_boundary_treats_accented_letters_as_separators() {
        assert_eq!(code("CAFÉSAVE2024"), Some("SAVE2024".to_string()));
    }

    #[test]
    fn discount_percentage_needs_ascii_digits() {
        assert_eq!(discount("٥٠% off or 20% off"), Some("20% off".to_string()));
    }

    #[test]
    fn code_ignores_lower_case_and_short_tokens() {
        assert_eq!(code("welcome10 ABC12"), None);
    }

    // ── Discount ──────────────────────────────────────────────────────────────

    #[test]
    fn discount_percentage_keeps_suffix() {
        assert_eq!(discount("Get 15 % OFF today"), Some("15 % OFF".to_string()));
    }

    #[test]
    fn discount_percentage_beats_amount() {
        assert_eq!(discount("$5 or 10% off"), Some("10% off".to_string()));
    }

    #[test]
    fn discount_currency_amounts() {
        assert_eq!(discount("Flat ₹500 off on orders"), Some("₹500 off".to_string()));
        assert_eq!(discount("Worth $10.50"), Some("$10.50".to_string()));
        assert_eq!(discount("£ 7 discount applied"), Some("£ 7 discount".to_string()));
    }

    #[test]
    fn discount_none_without_numbers() {
        assert_eq!(discount("Free shipping"), None);
    }
}
