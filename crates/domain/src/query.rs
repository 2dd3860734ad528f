// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::SortSpec;

/// A composed customer listing query: an optional name-substring filter
/// and a sort directive.
///
/// Filter and sort are orthogonal: the filter narrows the candidate set
/// and the sort orders whatever remains. The filter is matched with the
/// backing store's default `LIKE` collation (case-insensitive for ASCII).
/// Construction normalizes an empty or whitespace-only filter to "no
/// filter", so `list(filter="")` is equivalent to an unfiltered listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomerQuery {
    filter: Option<String>,
    sort: SortSpec,
}

impl CustomerQuery {
    /// Creates a query from an optional filter substring and a sort spec.
    #[must_use]
    pub fn new(filter: Option<String>, sort: SortSpec) -> Self {
        let filter = filter
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty());
        Self { filter, sort }
    }

    /// The active filter substring, if any.
    #[must_use]
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// The sort directive.
    #[must_use]
    pub const fn sort(&self) -> SortSpec {
        self.sort
    }

    /// The `LIKE` pattern for the active filter, if any.
    ///
    /// The substring is wrapped in `%` wildcards and is intended to be
    /// bound as a statement parameter, never spliced into query text.
    #[must_use]
    pub fn like_pattern(&self) -> Option<String> {
        self.filter.as_ref().map(|f| format!("%{f}%"))
    }
}
