//! Pagination for the registrant table.
//!
//! # Examples
//!
//! ```
//! use spmb_portal::pagination::Paginator;
//!
//! let items: Vec<i32> = (1..=25).collect();
//! let paginator = Paginator::new(items, 10);
//! assert_eq!(paginator.num_pages(), 3);
//!
//! let page = paginator.get_page(3);
//! assert_eq!(page.object_list(), &[21, 22, 23, 24, 25]);
//! assert_eq!(page.start_index(), 21);
//! assert!(!page.has_next());
//! ```

use serde::Serialize;

/// Splits a list into fixed-size pages.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    object_list: Vec<T>,
    per_page: usize,
}

impl<T: Clone> Paginator<T> {
    /// Creates a paginator. A `per_page` of zero is treated as one.
    pub fn new(object_list: Vec<T>, per_page: usize) -> Self {
        Self {
            object_list,
            per_page: per_page.max(1),
        }
    }

    pub fn count(&self) -> usize {
        self.object_list.len()
    }

    /// Returns the number of pages; an empty list still has one page.
    pub fn num_pages(&self) -> usize {
        self.count().div_ceil(self.per_page).max(1)
    }

    /// Returns the requested 1-based page, clamped into range.
    pub fn get_page(&self, number: usize) -> Page<T> {
        let num_pages = self.num_pages();
        let number = number.clamp(1, num_pages);
        let start = ((number - 1) * self.per_page).min(self.count());
        let end = (start + self.per_page).min(self.count());
        Page {
            object_list: self.object_list[start..end].to_vec(),
            number,
            num_pages,
            per_page: self.per_page,
            total: self.count(),
        }
    }
}

/// One page of a [`Paginator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_field_names)]
pub struct Page<T> {
    object_list: Vec<T>,
    number: usize,
    num_pages: usize,
    per_page: usize,
    total: usize,
}

impl<T> Page<T> {
    pub fn object_list(&self) -> &[T] {
        &self.object_list
    }

    pub fn into_object_list(self) -> Vec<T> {
        self.object_list
    }

    pub const fn number(&self) -> usize {
        self.number
    }

    pub const fn num_pages(&self) -> usize {
        self.num_pages
    }

    /// Total items across all pages.
    pub const fn total(&self) -> usize {
        self.total
    }

    pub const fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// The 1-based index of the first item on this page, or 0 if empty.
    pub fn start_index(&self) -> usize {
        if self.object_list.is_empty() {
            0
        } else {
            (self.number - 1) * self.per_page + 1
        }
    }

    /// The 1-based index of the last item on this page, or 0 if empty.
    pub fn end_index(&self) -> usize {
        if self.object_list.is_empty() {
            0
        } else {
            self.start_index() + self.object_list.len() - 1
        }
    }

    /// The footer text, e.g. `Menampilkan 1 - 10 dari 25 data`.
    pub fn summary(&self) -> String {
        format!(
            "Menampilkan {} - {} dari {} data",
            self.start_index(),
            self.end_index(),
            self.total
        )
    }
}
