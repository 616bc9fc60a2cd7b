use voucherdrop_core::category::category_keywords;
use voucherdrop_core::CategoryVocabulary;

/// First category, in vocabulary order, whose keywords appear anywhere in
/// the text. Returned with its original casing.
pub fn pick_category<'a>(text: &str, vocabulary: &'a CategoryVocabulary) -> Option<&'a str> {
    let lowered = text.to_lowercase();
    vocabulary.iter().find(|label| {
        category_keywords(label)
            .iter()
            .any(|keyword| lowered.contains(keyword.as_str()))
    })
}
