//! Static, read-only records served by the user endpoints.

use serde::Serialize;
use utoipa::ToSchema;

/// A single catalogue item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Item {
    /// Display name.
    #[schema(value_type = String)]
    pub item_name: &'static str,
}

/// Names returned by the user listing.
pub const USERS: [&str; 2] = ["shuvam", "dutta"];

/// Item catalogue.
pub const ITEMS: [Item; 3] = [
    Item { item_name: "Foo" },
    Item { item_name: "Bar" },
    Item { item_name: "Baz" },
];

/// Window `[skip, skip + limit)` over `items`.
///
/// Negative bounds count back from the end and everything clamps to the
/// slice, so out-of-range windows come back short or empty.
pub fn slice_window<T>(items: &[T], skip: i64, limit: i64) -> &[T] {
    let len = i64::try_from(items.len()).unwrap_or(i64::MAX);
    let clamp = |index: i64| -> usize {
        let resolved = if index < 0 { index.saturating_add(len) } else { index };
        // Bounded by `len`, which came from a usize.
        resolved.clamp(0, len) as usize
    };

    let start = clamp(skip);
    let end = clamp(skip.saturating_add(limit));

    if end <= start {
        &items[..0]
    } else {
        &items[start..end]
    }
}
