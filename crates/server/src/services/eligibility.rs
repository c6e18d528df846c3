//! Restaurant eligibility resolution.
//!
//! An order can only be assigned to a restaurant whose menu covers every
//! ordered product with availability switched on. The eligible set is the
//! intersection of the per-product carrier sets.

use std::collections::HashSet;

use flamegrill_core::{ProductId, RestaurantId};

use crate::models::catalog::MenuEntry;

/// Restaurants able to fulfill every one of the given products.
///
/// `entries` is the available-menu working set (typically one catalog query
/// per dashboard render); entries with `availability = false` are ignored if
/// present. An empty `product_ids` yields the empty set: intersecting over
/// zero sets would mathematically be the universal set, which is never the
/// right answer for an order with no items.
#[must_use]
pub fn eligible_restaurants(
    product_ids: &[ProductId],
    entries: &[MenuEntry],
) -> HashSet<RestaurantId> {
    let distinct: HashSet<ProductId> = product_ids.iter().copied().collect();
    if distinct.is_empty() {
        return HashSet::new();
    }

    let mut eligible: Option<HashSet<RestaurantId>> = None;
    for product_id in distinct {
        let carriers: HashSet<RestaurantId> = entries
            .iter()
            .filter(|entry| entry.availability && entry.product_id == product_id)
            .map(|entry| entry.restaurant_id)
            .collect();

        eligible = Some(match eligible {
            None => carriers,
            Some(acc) => acc.intersection(&carriers).copied().collect(),
        });

        // A product nobody carries empties the intersection for good.
        if eligible.as_ref().is_some_and(HashSet::is_empty) {
            break;
        }
    }

    eligible.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use flamegrill_core::MenuEntryId;

    use super::*;

    fn entry(id: i64, restaurant: i64, product: i64, availability: bool) -> MenuEntry {
        MenuEntry {
            id: MenuEntryId::new(id),
            restaurant_id: RestaurantId::new(restaurant),
            product_id: ProductId::new(product),
            availability,
        }
    }

    const PIZZA: ProductId = ProductId::new(1);
    const COLA: ProductId = ProductId::new(2);
    const SOUP: ProductId = ProductId::new(3);

    /// Restaurant A (1) carries pizza and cola, restaurant B (2) only pizza.
    fn fixture() -> Vec<MenuEntry> {
        vec![
            entry(1, 1, 1, true),
            entry(2, 1, 2, true),
            entry(3, 2, 1, true),
        ]
    }

    #[test]
    fn test_intersection_over_all_items() {
        let eligible = eligible_restaurants(&[PIZZA, COLA], &fixture());
        assert_eq!(eligible, HashSet::from([RestaurantId::new(1)]));
    }

    #[test]
    fn test_single_product_yields_all_carriers() {
        let eligible = eligible_restaurants(&[PIZZA], &fixture());
        assert_eq!(
            eligible,
            HashSet::from([RestaurantId::new(1), RestaurantId::new(2)])
        );
    }

    #[test]
    fn test_empty_order_yields_empty_set_not_universal() {
        let eligible = eligible_restaurants(&[], &fixture());
        assert!(eligible.is_empty());
    }

    #[test]
    fn test_uncarried_product_empties_result() {
        let eligible = eligible_restaurants(&[PIZZA, SOUP], &fixture());
        assert!(eligible.is_empty());
    }

    #[test]
    fn test_unavailable_entries_do_not_count() {
        let mut entries = fixture();
        // Restaurant B lists cola but has it switched off
        entries.push(entry(4, 2, 2, false));

        let eligible = eligible_restaurants(&[PIZZA, COLA], &entries);
        assert_eq!(eligible, HashSet::from([RestaurantId::new(1)]));
    }

    #[test]
    fn test_duplicate_products_count_once() {
        let eligible = eligible_restaurants(&[PIZZA, PIZZA, COLA], &fixture());
        assert_eq!(eligible, HashSet::from([RestaurantId::new(1)]));
    }
}
