// Paginated list helper.
// Accumulates pages from the portal's paged endpoints and tracks
// whether more remain.

/// Pages of items accumulated from a paged endpoint.
#[derive(Debug, Clone)]
pub struct PaginatedList<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub current_page: u32,
    pub has_more: bool,
    pub loading_more: bool,
}

impl<T> Default for PaginatedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            current_page: 1,
            has_more: false,
            loading_more: false,
        }
    }
}

impl<T> PaginatedList<T> {
    pub fn new(items: Vec<T>, total_count: u64) -> Self {
        let has_more = items.len() < total_count as usize;
        Self {
            items,
            total_count,
            current_page: 1,
            has_more,
            loading_more: false,
        }
    }

    /// Append the next page of items.
    pub fn append(&mut self, mut items: Vec<T>, total_count: u64) {
        self.items.append(&mut items);
        self.total_count = total_count;
        self.current_page += 1;
        self.has_more = self.items.len() < total_count as usize;
        self.loading_more = false;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
