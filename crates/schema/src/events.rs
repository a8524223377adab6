//! Event Name Table: maps ecommerce event labels to Branch standard events.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Commerce,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDescriptor {
    pub label: &'static str,
    pub canonical_name: &'static str,
    pub category: EventCategory,
}

const fn event(
    label: &'static str,
    canonical_name: &'static str,
    category: EventCategory,
) -> EventDescriptor {
    EventDescriptor {
        label,
        canonical_name,
        category,
    }
}

pub const EVENTS: &[EventDescriptor] = &[
    event("Product Added", "ADD_TO_CART", EventCategory::Commerce),
    event("Product Added to Wishlist", "ADD_TO_WISHLIST", EventCategory::Commerce),
    event("Cart Viewed", "VIEW_CART", EventCategory::Commerce),
    event("Checkout Started", "INITIATE_PURCHASE", EventCategory::Commerce),
    event("Payment Info Entered", "ADD_PAYMENT_INFO", EventCategory::Commerce),
    event("Clicked Promotion", "CLICK_AD", EventCategory::Commerce),
    event("Viewed Promotion", "VIEW_AD", EventCategory::Commerce),
    event("Product List Viewed", "VIEW_ITEMS", EventCategory::Commerce),
    event("Product Viewed", "VIEW_ITEM", EventCategory::Content),
    event("Products Searched", "SEARCH", EventCategory::Content),
];

/// Resolve an event label. Labels are matched exactly (case-sensitive).
pub fn lookup_event(label: &str) -> Option<&'static EventDescriptor> {
    EVENTS.iter().find(|e| e.label == label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        let added = lookup_event("Product Added").unwrap();
        assert_eq!(added.canonical_name, "ADD_TO_CART");
        assert_eq!(added.category, EventCategory::Commerce);

        let searched = lookup_event("Products Searched").unwrap();
        assert_eq!(searched.canonical_name, "SEARCH");
        assert_eq!(searched.category, EventCategory::Content);

        assert_eq!(EVENTS.len(), 10);
    }

    #[test]
    fn test_unknown_labels() {
        assert!(lookup_event("Order Completed").is_none());
        assert!(lookup_event("product added").is_none());
        assert!(lookup_event("").is_none());
    }
}
