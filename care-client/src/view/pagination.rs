//! Client-side pagination

/// One page of a list
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, clamped to `1..=total_pages`
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based position of the first row, 0 when empty ("showing 11-20 of 42")
    pub fn first_row(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    pub fn last_row(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_row() + self.items.len() - 1
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

impl Paginator {
    /// A zero page size is treated as 1
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total pages; an empty list still has one (empty) page
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size).max(1)
    }

    pub fn page<T: Clone>(&self, items: &[T], page: usize) -> Page<T> {
        let total_pages = self.total_pages(items.len());
        let page = page.clamp(1, total_pages);
        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(items.len());

        Page {
            items: items[start.min(end)..end].to_vec(),
            page,
            page_size: self.page_size,
            total_items: items.len(),
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages() {
        let items: Vec<u32> = (1..=23).collect();
        let p = Paginator::new(10);
        assert_eq!(p.total_pages(items.len()), 3);

        let first = p.page(&items, 1);
        assert_eq!(first.items.len(), 10);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = p.page(&items, 3);
        assert_eq!(last.items, vec![21, 22, 23]);
        assert_eq!((last.first_row(), last.last_row()), (21, 23));
        assert!(!last.has_next());
    }

    #[test]
    fn test_clamping_and_empty() {
        let items: Vec<u32> = (1..=5).collect();
        let p = Paginator::new(0);
        assert_eq!(p.page_size(), 1);
        assert_eq!(p.page(&items, 99).page, 5);
        assert_eq!(p.page(&items, 0).items, vec![1]);

        let empty: Vec<u32> = Vec::new();
        let page = Paginator::default().page(&empty, 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.first_row(), 0);
    }
}
