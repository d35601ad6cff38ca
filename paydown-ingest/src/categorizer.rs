//! Auto-categorization: keyword rules plus weights learned from the user's
//! past corrections. A learned category always beats a static rule, since a
//! correction is direct evidence of what the user wants.

use std::collections::HashMap;

/// Static keyword fallback for descriptions the user has never touched.
fn rule_category(description: &str) -> Option<&'static str> {
    let desc = description.to_lowercase();

    if desc.contains("grocery")
        || desc.contains("supermarket")
        || desc.contains("whole foods")
        || desc.contains("market")
    {
        return Some("groceries");
    }

    if desc.contains("restaurant")
        || desc.contains("uber eats")
        || desc.contains("doordash")
        || desc.contains("grubhub")
        || desc.contains("cafe")
        || desc.contains("coffee")
        || desc.contains("dining")
    {
        return Some("dining");
    }

    if desc.contains("uber")
        || desc.contains("lyft")
        || desc.contains("gas station")
        || desc.contains("shell")
        || desc.contains("chevron")
        || desc.contains("parking")
        || desc.contains("transit")
    {
        return Some("transport");
    }

    if desc.contains("rent")
        || desc.contains("lease")
        || desc.contains("landlord")
        || desc.contains("mortgage")
    {
        return Some("housing");
    }

    if desc.contains("electric")
        || desc.contains("water bill")
        || desc.contains("internet")
        || desc.contains("utility")
        || desc.contains("phone bill")
    {
        return Some("utilities");
    }

    if desc.contains("netflix")
        || desc.contains("spotify")
        || desc.contains("hulu")
        || desc.contains("subscription")
        || desc.contains("gym")
    {
        return Some("subscriptions");
    }

    if desc.contains("payroll")
        || desc.contains("salary")
        || desc.contains("direct deposit")
        || desc.contains("stipend")
    {
        return Some("income");
    }

    if desc.contains("pharmacy")
        || desc.contains("clinic")
        || desc.contains("hospital")
        || desc.contains("dental")
    {
        return Some("health");
    }

    None
}

/// Keyword-vote categorizer seeded from past user corrections.
#[derive(Debug, Clone, Default)]
pub struct AutoCategorizer {
    /// token -> category -> times the user filed that token under the category
    corrections: HashMap<String, HashMap<String, u32>>,
}

impl AutoCategorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a categorizer from a history of (description, category) pairs.
    pub fn from_history<'a>(history: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut cat = Self::new();
        for (description, category) in history {
            cat.learn(description, category);
        }
        cat
    }

    /// Record one user correction.
    pub fn learn(&mut self, description: &str, category: &str) {
        for token in tokens(description) {
            *self
                .corrections
                .entry(token)
                .or_default()
                .entry(category.to_lowercase())
                .or_insert(0) += 1;
        }
    }

    /// Suggest a category. History votes win; the static rules are only
    /// consulted when no learned token matches.
    pub fn suggest(&self, description: &str) -> Option<String> {
        let mut votes: HashMap<&str, u32> = HashMap::new();
        for token in tokens(description) {
            if let Some(counts) = self.corrections.get(&token) {
                for (category, count) in counts {
                    *votes.entry(category).or_insert(0) += count;
                }
            }
        }

        votes
            .into_iter()
            // Tie-break on name so suggestions are deterministic.
            .max_by(|(ca, va), (cb, vb)| va.cmp(vb).then(cb.cmp(ca)))
            .map(|(category, _)| category.to_string())
            .or_else(|| rule_category(description).map(String::from))
    }
}

/// Lower-cased alphanumeric tokens of 3+ chars, digits-only runs excluded
/// (reference numbers carry no signal).
fn tokens(description: &str) -> impl Iterator<Item = String> {
    description
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 3 && !t.chars().all(|c| c.is_ascii_digit()))
        .map(String::from)
        .collect::<Vec<_>>()
        .into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_cover_common_merchants() {
        let cat = AutoCategorizer::new();
        assert_eq!(cat.suggest("WHOLE FOODS MARKET #123").as_deref(), Some("groceries"));
        assert_eq!(cat.suggest("NETFLIX.COM").as_deref(), Some("subscriptions"));
        assert_eq!(cat.suggest("PAYROLL ACME INC").as_deref(), Some("income"));
        assert_eq!(cat.suggest("ZYXW UNKNOWN VENDOR"), None);
    }

    #[test]
    fn test_history_beats_rules() {
        // The rules would say "dining", but the user has filed this merchant
        // under "work lunches" before.
        let cat = AutoCategorizer::from_history([
            ("BLUE BOTTLE COFFEE OAK", "work lunches"),
            ("BLUE BOTTLE COFFEE SF", "work lunches"),
        ]);
        assert_eq!(
            cat.suggest("BLUE BOTTLE COFFEE LA").as_deref(),
            Some("work lunches")
        );
    }

    #[test]
    fn test_votes_weighted_by_frequency() {
        let cat = AutoCategorizer::from_history([
            ("AMAZON MKTPLACE", "shopping"),
            ("AMAZON MKTPLACE", "shopping"),
            ("AMAZON PRIME VIDEO", "subscriptions"),
        ]);
        assert_eq!(cat.suggest("AMAZON MKTPLACE PMTS").as_deref(), Some("shopping"));
    }

    #[test]
    fn test_reference_numbers_ignored() {
        let mut cat = AutoCategorizer::new();
        cat.learn("CHECK 100234 RENT", "housing");
        // Pure digit tokens never become evidence.
        assert!(cat.suggest("TRANSFER 100234").is_none());
    }
}
