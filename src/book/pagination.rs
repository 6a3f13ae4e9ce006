use std::sync::Arc;

use crate::catalog::{Catalog, Entry, EntryId};

/// Number of fixed pages before the first entry page.
pub const NUM_INTRO_PAGES: usize = 6;

/// What a page number shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageKind {
    Welcome,
    Contents,
    SpellRecipe,
    HeadRecipe,
    BuildInstructions,
    Diagram,
    /// Position in the rank ordering.
    Entry(usize),
    Blank,
}

const INTRO_KINDS: [PageKind; NUM_INTRO_PAGES] = [
    PageKind::Welcome,
    PageKind::Contents,
    PageKind::SpellRecipe,
    PageKind::HeadRecipe,
    PageKind::BuildInstructions,
    PageKind::Diagram,
];

impl PageKind {
    pub fn is_entry(self) -> bool {
        matches!(self, PageKind::Entry(_))
    }
}

/// Maps page numbers to page kinds for one catalog.
///
/// Pages `0..intro_pages` are the fixed intro pages, followed by one page per
/// entry in rank order. The book is read as two-page spreads whose left page
/// is always even.
#[derive(Clone, Debug)]
pub struct Pagination {
    catalog: Arc<Catalog>,
    intro_pages: usize,
}

impl Pagination {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_intro_pages(catalog, NUM_INTRO_PAGES)
    }

    /// # Panics
    /// If `intro_pages` is odd or larger than the number of intro page kinds;
    /// an odd count would put entry spreads on odd pages.
    pub fn with_intro_pages(catalog: Arc<Catalog>, intro_pages: usize) -> Self {
        assert!(
            intro_pages <= INTRO_KINDS.len() && intro_pages % 2 == 0,
            "intro page count must be even and at most {}, got {intro_pages}",
            INTRO_KINDS.len()
        );
        Self {
            catalog,
            intro_pages,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn intro_pages(&self) -> usize {
        self.intro_pages
    }

    pub fn total_pages(&self) -> usize {
        self.intro_pages + self.catalog.len()
    }

    pub fn page_kind(&self, page: usize) -> PageKind {
        if page < self.intro_pages {
            INTRO_KINDS[page]
        } else if page < self.total_pages() {
            PageKind::Entry(page - self.intro_pages)
        } else {
            PageKind::Blank
        }
    }

    pub fn entry_for_page(&self, page: usize) -> Option<&Entry> {
        match self.page_kind(page) {
            PageKind::Entry(k) => Some(self.catalog.rank_order_at(k)),
            _ => None,
        }
    }

    pub fn can_go_back(&self, cur_page: usize) -> bool {
        cur_page > 0
    }

    /// True only when stepping would reveal a new left page. A trailing
    /// spread whose right page is the last one is not paged past.
    pub fn can_go_forward(&self, cur_page: usize) -> bool {
        cur_page + 2 < self.total_pages()
    }

    /// Left page of the spread holding `id`, or `None` for unknown entries.
    pub fn jump_to_entry(&self, id: EntryId) -> Option<usize> {
        let index = self.catalog.index_of_by_rank(id)?;
        Some(index / 2 * 2 + self.intro_pages)
    }

    /// Left page of the spread containing `page`.
    pub fn spread_start(page: usize) -> usize {
        page / 2 * 2
    }
}
