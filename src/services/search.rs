//! Paginated search shared by the entity services
//!
//! Filter by case-insensitive substring, sort by an allow-listed key, then
//! skip/take. Records that compare equal under the chosen key are ordered
//! by ascending id, so the output does not depend on store iteration order.

use std::cmp::Ordering;

use crate::dto::pagination_dto::{PagedResult, SearchParams};

pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// An entity that can go through `search`.
pub trait Searchable {
    fn id(&self) -> i64;

    /// Fields matched against the search term
    fn search_fields(&self) -> Vec<&str>;

    /// Comparator for a lower-cased sort key, `None` when the key is not
    /// allow-listed. Unknown keys sort by id.
    fn comparator(key: &str) -> Option<Comparator<Self>>
    where
        Self: Sized;
}

pub fn matches_term<T: Searchable>(item: &T, term: &str) -> bool {
    let needle = term.to_lowercase();
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn by_id<T: Searchable>(a: &T, b: &T) -> Ordering {
    a.id().cmp(&b.id())
}

/// Resolves `order_by` to a comparator, defaulting to ascending id.
pub fn resolve_comparator<T: Searchable>(order_by: &str) -> Comparator<T> {
    T::comparator(&order_by.trim().to_lowercase()).unwrap_or(by_id::<T>)
}

/// Runs filter, sort and pagination over a full table scan.
///
/// `params` is expected to be normalized already.
pub fn search<T: Searchable>(items: Vec<T>, params: &SearchParams) -> PagedResult<T> {
    let term = params.search_term.trim();
    let mut filtered: Vec<T> = if term.is_empty() {
        items
    } else {
        items
            .into_iter()
            .filter(|item| matches_term(item, term))
            .collect()
    };

    let total_count = filtered.len() as i64;

    let compare = resolve_comparator::<T>(&params.order_by);
    let descending = params.descending;
    filtered.sort_by(|a, b| {
        let ordering = compare(a, b);
        let ordering = if descending { ordering.reverse() } else { ordering };
        ordering.then_with(|| by_id(a, b))
    });

    let offset = params
        .page_number
        .saturating_sub(1)
        .saturating_mul(params.page_size)
        .max(0);
    let skip = usize::try_from(offset).unwrap_or(usize::MAX);
    let take = usize::try_from(params.page_size).unwrap_or(0);
    let page: Vec<T> = filtered.into_iter().skip(skip).take(take).collect();

    PagedResult::new(page, total_count, params.page_number, params.page_size)
}
