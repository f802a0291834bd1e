//! Text-to-number helpers shared by every site: price parsing, keyword
//! filtering and discount computation.

/// Parse a displayed price such as `₹1,23,456` into an integer amount.
///
/// Every character that is not an ASCII digit is dropped. Returns `None`
/// when no digits remain or the amount does not fit in a `u64`.
pub fn parse_price(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Discount of `price` against `list_price` as a percentage rounded to two
/// decimals. Zero unless `list_price` is strictly greater than `price`.
#[allow(clippy::cast_precision_loss)]
pub fn discount_pct(price: u64, list_price: u64) -> f64 {
    if list_price <= price {
        return 0.0;
    }

    let pct = (list_price - price) as f64 / list_price as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Title filter built from groups of keywords.
///
/// A title passes when every group has at least one keyword that occurs in
/// it, compared case-insensitively. With no groups every title passes.
#[derive(Debug, Clone, Default)]
pub struct KeywordFilter {
    groups: Vec<Vec<String>>,
}

impl KeywordFilter {
    pub fn new(groups: Vec<Vec<String>>) -> Self {
        let groups = groups
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .map(|keyword| keyword.trim().to_lowercase())
                    .filter(|keyword| !keyword.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|group| !group.is_empty())
            .collect();

        Self { groups }
    }

    /// Parse groups from the `4060,4070;intel,i5,i7` notation used in the
    /// environment: `;` separates groups, `,` separates keywords.
    pub fn parse(raw: &str) -> Self {
        let groups = raw
            .split(';')
            .map(|group| group.split(',').map(str::to_string).collect())
            .collect();
        Self::new(groups)
    }

    pub fn matches(&self, title: &str) -> bool {
        let title_lower = title.to_lowercase();
        self.groups
            .iter()
            .all(|group| group.iter().any(|keyword| title_lower.contains(keyword)))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gpu_cpu_filter() -> KeywordFilter {
        KeywordFilter::new(vec![
            vec!["4060".to_string(), "4070".to_string()],
            vec!["intel".to_string(), "i5".to_string(), "i7".to_string()],
        ])
    }

    #[test]
    fn parses_indian_grouping() {
        assert_eq!(parse_price("1,23,456"), Some(123_456));
    }

    #[test]
    fn parses_currency_symbol() {
        assert_eq!(parse_price("₹45,000"), Some(45_000));
        assert_eq!(parse_price("  ₹ 59,990 "), Some(59_990));
    }

    #[test]
    fn missing_digits_is_absent() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("N/A"), None);
        assert_eq!(parse_price("₹"), None);
    }

    #[test]
    fn overflowing_amount_is_absent() {
        assert_eq!(parse_price("99999999999999999999999"), None);
    }

    #[test]
    fn filter_requires_every_group() {
        let filter = gpu_cpu_filter();
        assert!(filter.matches("RTX 4060 Intel i7 Laptop"));
        assert!(!filter.matches("RTX 3050 Intel i7 Laptop"));
        assert!(!filter.matches("4070 AMD Ryzen"));
    }

    #[test]
    fn filter_is_case_insensitive() {
        let filter = gpu_cpu_filter();
        assert!(filter.matches("asus tuf rtx 4070 INTEL core"));
    }

    #[test]
    fn empty_filter_passes_everything() {
        let filter = KeywordFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches("anything at all"));
        assert!(KeywordFilter::parse("").matches("anything"));
    }

    #[test]
    fn parse_splits_groups_and_keywords() {
        let filter = KeywordFilter::parse("4060, 4070;Intel,i5 ,i7");
        assert!(filter.matches("RTX 4060 Intel i7 Laptop"));
        assert!(!filter.matches("4070 AMD Ryzen"));
    }

    #[test]
    fn discount_from_list_price() {
        assert!((discount_pct(45_000, 60_000) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn discount_rounds_to_two_decimals() {
        assert!((discount_pct(2, 3) - 33.33).abs() < 1e-9);
    }

    #[test]
    fn no_discount_without_markdown() {
        assert!(discount_pct(45_000, 45_000).abs() < f64::EPSILON);
        assert!(discount_pct(50_000, 45_000).abs() < f64::EPSILON);
        assert!(discount_pct(0, 0).abs() < f64::EPSILON);
    }
}
