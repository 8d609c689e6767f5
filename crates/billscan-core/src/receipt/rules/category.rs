//! Keyword based spending categories.

use crate::models::record::Category;

/// Category rules in priority order. A rule matches when any of its terms
/// occurs anywhere in the lower-cased text.
pub const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (
        Category::Groceries,
        &[
            "grocery",
            "mart",
            "bread",
            "vegetable",
            "fruits",
            "dmart",
            "bigbazaar",
            "megamart",
            "supermarket",
        ],
    ),
    (
        Category::Dining,
        &["hotel", "restaurant", "dine", "cafe", "coffee", "pizza", "burger"],
    ),
    (
        Category::Health,
        &["pharm", "medical", "chemist", "tablet", "medicine"],
    ),
    (Category::Fuel, &["fuel", "petrol", "diesel"]),
    (
        Category::Electronics,
        &["electronics", "mobile", "charger", "headphone", "speaker"],
    ),
];

/// Classify the text into the first matching category, `General` otherwise.
pub fn categorize(text: &str) -> Category {
    let text = text.to_lowercase();

    CATEGORY_RULES
        .iter()
        .find(|(_, terms)| terms.iter().any(|term| text.contains(term)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health() {
        assert_eq!(categorize("City Pharmacy\nParacetamol Tablet x2"), Category::Health);
    }

    #[test]
    fn test_general_when_nothing_matches() {
        assert_eq!(categorize("Acme Hardware\nNails ₹20"), Category::General);
        assert_eq!(categorize(""), Category::General);
    }

    #[test]
    fn test_priority_order() {
        // Groceries outranks Dining
        assert_eq!(categorize("Cafe inside FreshMart"), Category::Groceries);
        assert_eq!(categorize("Highway Petrol Pump"), Category::Fuel);
        assert_eq!(categorize("USB Charger"), Category::Electronics);
    }

    #[test]
    fn test_substring_match() {
        assert_eq!(categorize("PIZZAHUT"), Category::Dining);
    }
}
