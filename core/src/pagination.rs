//! Page cursor, derived page count, and fetch supersession.
//!
//! # Design
//! Each outgoing page fetch carries a `FetchTicket` stamped with the current
//! generation. Issuing a newer fetch, or applying any optimistic change,
//! advances the generation, so a response that was already in flight is
//! recognised as stale when it lands and is dropped instead of overwriting
//! newer local state. No request is actually cancelled.

/// Default number of todos per page.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// How many page numbers to show either side of the current one.
const PAGE_WINDOW: u32 = 2;

/// Identifies one page fetch so its response can be matched against the
/// controller's current generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub page: u32,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct Pagination {
    current_page: u32,
    page_size: u32,
    total_count: Option<u64>,
    generation: u64,
    in_flight: Option<FetchTicket>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// A page size of 0 is bumped to 1.
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_count: None,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Server-reported total from the last successful fetch.
    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    /// `ceil(total / page_size)`, never less than 1.
    pub fn total_pages(&self) -> u32 {
        let Some(total) = self.total_count else {
            return 1;
        };
        let pages = total.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }

    /// Move to `page`. Returns `true` if the page actually changed.
    ///
    /// Callers keep `page` inside `[1, total_pages]`; only 0 is corrected.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn reset_to_first(&mut self) -> bool {
        self.set_page(1)
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Whether page controls are worth rendering at all.
    pub fn shows_controls(&self) -> bool {
        self.total_pages() > 1
    }

    /// Page numbers to offer: the current page and up to two either side,
    /// clipped to `[1, total_pages]`.
    pub fn visible_pages(&self) -> Vec<u32> {
        let total = self.total_pages();
        let start = self.current_page.saturating_sub(PAGE_WINDOW).max(1);
        let end = self.current_page.saturating_add(PAGE_WINDOW).min(total);
        (start..=end).collect()
    }

    /// Open a fetch for the current page, superseding any in flight.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        let ticket = FetchTicket {
            page: self.current_page,
            generation: self.generation,
        };
        self.in_flight = Some(ticket);
        ticket
    }

    /// Invalidate any in-flight fetch without starting a new one. Returns
    /// `true` if a fetch was cancelled, meaning the current page still has to
    /// be loaded.
    pub fn supersede(&mut self) -> bool {
        self.generation += 1;
        self.in_flight.take().is_some()
    }

    /// Whether a response for `ticket` may still be applied.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.in_flight == Some(ticket)
    }

    /// Close `ticket` after a successful fetch. Returns `false` for a stale
    /// ticket, in which case nothing changes.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, total_count: u64) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.in_flight = None;
        self.total_count = Some(total_count);
        true
    }

    /// Close `ticket` after a failed fetch. Returns `false` for a stale ticket.
    pub fn fail_fetch(&mut self, ticket: FetchTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.in_flight = None;
        true
    }

    /// No fetch has succeeded yet.
    pub fn is_loading(&self) -> bool {
        self.total_count.is_none()
    }

    /// A fetch is outstanding.
    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }
}
