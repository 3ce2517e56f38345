//! Mapping from category labels to display emoji.

/// The emoji displayed next to a transaction's category label.
///
/// Category labels are free text, so unrecognised labels fall back to a
/// generic clipboard emoji rather than failing.
pub fn category_emoji(category: &str) -> &'static str {
    match category {
        "Food & Drink" => "🍽️",
        "Income" => "💰",
        "Salary" => "💼",
        "Entertainment" => "🎬",
        "Transportation" | "Transport" => "🚗",
        "Groceries" => "🛒",
        "Health & Fitness" => "💊",
        "Investment" => "📈",
        "Shopping" => "🛍️",
        "Rewards" => "🎁",
        "Utilities" => "💡",
        "Government" => "🏛️",
        "Home & Garden" => "🏠",
        _ => "📋",
    }
}
