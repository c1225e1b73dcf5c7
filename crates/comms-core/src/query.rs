//! Free-text search over in-memory record collections.
//!
//! Every view that exposes a search box uses the same semantics: the query
//! is matched case-insensitively as a substring, a record matches when ANY
//! of its searchable fields contains the query, and the empty query matches
//! everything. Filtering is stable and never mutates the input.

/// A named textual field of a record that participates in search.
pub struct SearchField<T> {
    pub name: &'static str,
    pub get: fn(&T) -> &str,
}

/// Record types that declare a fixed set of searchable fields.
pub trait Searchable: Sized + 'static {
    const SEARCH_FIELDS: &'static [SearchField<Self>];

    /// Names of the searchable fields, in declaration order.
    fn search_field_names() -> Vec<&'static str> {
        Self::SEARCH_FIELDS.iter().map(|f| f.name).collect()
    }
}

/// True if any of `fields` of `record` contains `needle`.
///
/// `needle` must already be lowercased.
fn matches_lowered<T>(record: &T, needle: &str, fields: &[SearchField<T>]) -> bool {
    fields
        .iter()
        .any(|field| (field.get)(record).to_lowercase().contains(needle))
}

/// Case-insensitive substring test of a single record.
pub fn matches_query<T>(record: &T, query: &str, fields: &[SearchField<T>]) -> bool {
    matches_lowered(record, &query.to_lowercase(), fields)
}

/// Return the records whose listed fields contain `query`, in their
/// original relative order.
pub fn filter_by_query<T: Clone>(records: &[T], query: &str, fields: &[SearchField<T>]) -> Vec<T> {
    if query.is_empty() {
        return records.to_vec();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| matches_lowered(*r, &needle, fields))
        .cloned()
        .collect()
}

/// [`filter_by_query`] using the record type's own search fields.
pub fn search<T: Searchable + Clone>(records: &[T], query: &str) -> Vec<T> {
    filter_by_query(records, query, T::SEARCH_FIELDS)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
