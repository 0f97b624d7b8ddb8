//! Rendering of the downloadable shopping list.

/// Text returned when the cart has no ingredients.
pub const EMPTY_LIST_TEXT: &str = "Shopping list is empty.";

/// One aggregated line of the shopping list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingItem {
    pub name: String,
    pub measurement_unit: String,
    /// Sum of the amounts over every recipe in the cart.
    pub amount: i64,
}

/// Render aggregated items as `name: amount unit` lines.
///
/// Items are written in the order given; callers sort them.
pub fn render(items: &[ShoppingItem]) -> String {
    if items.is_empty() {
        return EMPTY_LIST_TEXT.to_string();
    }

    items
        .iter()
        .map(|item| format!("{}: {} {}", item.name, item.amount, item.measurement_unit))
        .collect::<Vec<_>>()
        .join("\n")
}
