//! Full result set of a search with fixed-size page windows over it.
//!
//! # Paging Rules
//!
//! ```text
//! page(w)        = items[w.index * w.size .. min((w.index + 1) * w.size, len)]
//! has_previous(w) = w.index > 0
//! has_next(w)     = (w.index + 1) * w.size < len
//! ```
//!
//! Out-of-range windows yield an empty page rather than an error. Items keep
//! the order the server returned them in.

/// Rows per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Zero-based page index and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page_index: usize,
    pub page_size: usize,
}

impl PageWindow {
    /// First page with `page_size` rows. A zero size is bumped to one.
    #[must_use]
    pub const fn first(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: if page_size == 0 { 1 } else { page_size },
        }
    }

    #[must_use]
    pub const fn with_index(self, page_index: usize) -> Self {
        Self { page_index, ..self }
    }

    /// Index of the first item in this window, saturating on overflow.
    #[must_use]
    pub const fn start(self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }

    /// Exclusive end index of this window, saturating on overflow.
    #[must_use]
    pub const fn end(self) -> usize {
        self.page_index.saturating_add(1).saturating_mul(self.page_size)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Read-only view of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultPage<'a, T> {
    pub window: PageWindow,
    pub items: &'a [T],
}

/// Snapshot of the last successful list fetch plus the current page window.
#[derive(Debug, Clone)]
pub struct ResultStore<T> {
    items: Vec<T>,
    window: PageWindow,
}

impl<T> ResultStore<T> {
    #[must_use]
    pub const fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            window: PageWindow::first(page_size),
        }
    }

    /// Installs a new full result set and rewinds to page 0.
    ///
    /// This is the only way items change; there is no append.
    pub fn replace(&mut self, items: Vec<T>) {
        let _span = tracing::debug_span!("result_store_replace", count = items.len()).entered();
        self.items = items;
        self.window = self.window.with_index(0);
    }

    /// Items inside `window`; empty when the window is past the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use recibos::store::{PageWindow, ResultStore};
    ///
    /// let mut store = ResultStore::new(100);
    /// store.replace((0..250).collect::<Vec<u32>>());
    /// assert_eq!(store.page(PageWindow::first(100).with_index(2)).items.len(), 50);
    /// assert!(store.page(PageWindow::first(100).with_index(3)).items.is_empty());
    /// ```
    #[must_use]
    pub fn page(&self, window: PageWindow) -> ResultPage<'_, T> {
        let len = self.items.len();
        let start = window.start().min(len);
        let end = window.end().min(len);
        ResultPage {
            window,
            items: &self.items[start..end],
        }
    }

    #[must_use]
    pub const fn has_previous(&self, window: PageWindow) -> bool {
        window.page_index > 0
    }

    #[must_use]
    pub fn has_next(&self, window: PageWindow) -> bool {
        window.end() < self.items.len()
    }

    /// Window the UI is currently showing.
    #[must_use]
    pub const fn window(&self) -> PageWindow {
        self.window
    }

    /// Moves the current window. Bounds are the caller's concern.
    pub fn set_page_index(&mut self, page_index: usize) {
        self.window = self.window.with_index(page_index);
    }

    /// Page at the current window.
    #[must_use]
    pub fn current_page(&self) -> ResultPage<'_, T> {
        self.page(self.window)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of pages needed for the current set, at least one.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.items.len().div_ceil(self.window.page_size).max(1)
    }
}

impl<T> Default for ResultStore<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_of(n: usize) -> ResultStore<usize> {
        let mut store = ResultStore::new(100);
        store.replace((0..n).collect());
        store
    }

    #[test]
    fn pages_over_250_items() {
        let store = store_of(250);
        let w = PageWindow::first(100);

        assert_eq!(store.page(w).items, (0..100).collect::<Vec<_>>().as_slice());
        assert_eq!(store.page(w.with_index(2)).items, (200..250).collect::<Vec<_>>().as_slice());
        assert!(store.page(w.with_index(3)).items.is_empty());

        assert!(!store.has_next(w.with_index(2)));
        assert!(store.has_next(w.with_index(1)));
        assert!(!store.has_previous(w));
        assert!(store.has_previous(w.with_index(1)));
        assert_eq!(store.page_count(), 3);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        let store = store_of(200);
        let w = PageWindow::first(100).with_index(1);
        assert_eq!(store.page(w).items.len(), 100);
        assert!(!store.has_next(w));
    }

    #[test]
    fn huge_page_index_is_empty_not_a_panic() {
        let store = store_of(10);
        let w = PageWindow::first(100).with_index(usize::MAX);
        assert!(store.page(w).items.is_empty());
        assert!(!store.has_next(w));
    }

    #[test]
    fn replace_rewinds_window() {
        let mut store = store_of(250);
        store.set_page_index(2);
        assert_eq!(store.current_page().items.len(), 50);

        store.replace(vec![7, 8, 9]);
        assert_eq!(store.window().page_index, 0);
        assert_eq!(store.current_page().items, &[7, 8, 9]);
    }

    #[test]
    fn empty_store_has_one_empty_page() {
        let store: ResultStore<u8> = ResultStore::default();
        assert!(store.is_empty());
        assert_eq!(store.page_count(), 1);
        assert!(store.current_page().items.is_empty());
        assert!(!store.has_next(store.window()));
    }

    #[test]
    fn zero_page_size_is_bumped() {
        assert_eq!(PageWindow::first(0).page_size, 1);
    }
}
