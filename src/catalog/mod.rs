pub mod entry;
pub mod source;

use std::fmt;
use std::ops::Range;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub use entry::{Entry, EntryId, RawEntry};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

fn next_token() -> u64 {
    NEXT_TOKEN.fetch_add(1, Ordering::Relaxed)
}

/// Why a source record was left out of the catalog.
#[derive(Clone, Debug, PartialEq)]
pub enum SkipReason {
    MissingName,
    MissingRank,
    NonFiniteRank(f32),
    Malformed(String),
}

/// A record that was skipped while building; `position` is its index in the
/// source, counting disabled and malformed records.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub position: usize,
    pub reason: SkipReason,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            SkipReason::MissingName => write!(f, "entry #{} has no name", self.position),
            SkipReason::MissingRank => write!(
                f,
                "entry #{} has neither a rank nor an attack value",
                self.position
            ),
            SkipReason::NonFiniteRank(rank) => {
                write!(f, "entry #{} has a non-finite rank ({rank})", self.position)
            }
            SkipReason::Malformed(msg) => write!(f, "entry #{} is malformed: {msg}", self.position),
        }
    }
}

/// The immutable set of book entries plus its two orderings.
///
/// `by_rank` sorts ascending by rank and `by_name` sorts by the byte order of
/// the name; both sorts are stable, so ties keep source order.
#[derive(Debug)]
pub struct Catalog {
    token: u64,
    entries: Vec<Entry>,
    by_rank: Vec<EntryId>,
    by_name: Vec<EntryId>,
    rank_position: Vec<usize>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl Catalog {
    pub fn empty() -> Self {
        Self::from_entries(next_token(), Vec::new())
    }

    pub fn build<I>(source: I) -> Self
    where
        I: IntoIterator<Item = RawEntry>,
    {
        Self::build_with_diagnostics(source).0
    }

    pub fn build_with_diagnostics<I>(source: I) -> (Self, Vec<Diagnostic>)
    where
        I: IntoIterator<Item = RawEntry>,
    {
        Self::from_positioned(source.into_iter().enumerate())
    }

    /// Build from records tagged with their source positions. Disabled
    /// records are dropped silently, invalid ones produce a diagnostic.
    pub(crate) fn from_positioned<I>(source: I) -> (Self, Vec<Diagnostic>)
    where
        I: IntoIterator<Item = (usize, RawEntry)>,
    {
        let token = next_token();
        let mut entries: Vec<Entry> = Vec::new();
        let mut diagnostics = Vec::new();

        for (position, raw) in source {
            if !raw.enabled {
                continue;
            }
            let name = match raw.name.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => {
                    diagnostics.push(Diagnostic {
                        position,
                        reason: SkipReason::MissingName,
                    });
                    continue;
                }
            };
            let rank = match raw.effective_rank() {
                Some(rank) if rank.is_finite() => rank,
                Some(rank) => {
                    diagnostics.push(Diagnostic {
                        position,
                        reason: SkipReason::NonFiniteRank(rank),
                    });
                    continue;
                }
                None => {
                    diagnostics.push(Diagnostic {
                        position,
                        reason: SkipReason::MissingRank,
                    });
                    continue;
                }
            };
            let id = EntryId::new(token, entries.len());
            entries.push(Entry::new(id, raw, name, rank));
        }

        for diag in &diagnostics {
            tracing::warn!(position = diag.position, "skipping catalog entry: {diag}");
        }

        let catalog = Self::from_entries(token, entries);
        tracing::info!(
            entries = catalog.len(),
            skipped = diagnostics.len(),
            "catalog built"
        );
        (catalog, diagnostics)
    }

    fn from_entries(token: u64, entries: Vec<Entry>) -> Self {
        let mut by_rank: Vec<EntryId> = entries.iter().map(Entry::id).collect();
        by_rank.sort_by(|a, b| entries[a.index].rank.total_cmp(&entries[b.index].rank));

        let mut by_name: Vec<EntryId> = entries.iter().map(Entry::id).collect();
        by_name.sort_by(|a, b| entries[a.index].name.cmp(&entries[b.index].name));

        let mut rank_position = vec![0; entries.len()];
        for (pos, id) in by_rank.iter().enumerate() {
            rank_position[id.index] = pos;
        }

        Self {
            token,
            entries,
            by_rank,
            by_name,
            rank_position,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `id` was issued by this catalog and is still in range.
    pub fn contains(&self, id: EntryId) -> bool {
        id.catalog == self.token && id.index < self.entries.len()
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        if !self.contains(id) {
            return None;
        }
        self.entries.get(id.index)
    }

    /// Entry at position `i` of the rank ordering.
    ///
    /// # Panics
    /// If `i >= len()`. Callers validate positions through the pagination
    /// model first.
    pub fn rank_order_at(&self, i: usize) -> &Entry {
        assert!(
            i < self.by_rank.len(),
            "rank index {i} out of bounds for catalog of {}",
            self.len()
        );
        &self.entries[self.by_rank[i].index]
    }

    /// Entry at position `i` of the name ordering.
    ///
    /// # Panics
    /// If `i >= len()`.
    pub fn name_order_at(&self, i: usize) -> &Entry {
        assert!(
            i < self.by_name.len(),
            "name index {i} out of bounds for catalog of {}",
            self.len()
        );
        &self.entries[self.by_name[i].index]
    }

    pub fn index_of_by_rank(&self, id: EntryId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        self.rank_position.get(id.index).copied()
    }

    pub fn by_rank(&self) -> impl Iterator<Item = &Entry> {
        self.by_rank.iter().map(|id| &self.entries[id.index])
    }

    pub fn by_name(&self) -> impl Iterator<Item = &Entry> {
        self.by_name.iter().map(|id| &self.entries[id.index])
    }

    /// Slice of the name ordering. `range` must lie within `0..len()`.
    pub fn name_range(&self, range: Range<usize>) -> impl Iterator<Item = &Entry> {
        self.by_name[range].iter().map(|id| &self.entries[id.index])
    }
}

/// Build-once slot for the session catalog.
///
/// The first `get_or_build` runs the builder; later calls hand out the same
/// `Arc`. `replace` swaps in a complete new catalog in one assignment, so
/// holders of the old `Arc` keep a consistent view.
#[derive(Debug, Default)]
pub struct CatalogCell {
    current: Option<Arc<Catalog>>,
}

impl CatalogCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_built(&self) -> bool {
        self.current.is_some()
    }

    pub fn get_or_build<F>(&mut self, build: F) -> Arc<Catalog>
    where
        F: FnOnce() -> Catalog,
    {
        match self.current {
            Some(ref catalog) => Arc::clone(catalog),
            None => {
                let catalog = Arc::new(build());
                self.current = Some(Arc::clone(&catalog));
                catalog
            }
        }
    }

    pub fn replace(&mut self, catalog: Catalog) -> Arc<Catalog> {
        let catalog = Arc::new(catalog);
        self.current = Some(Arc::clone(&catalog));
        catalog
    }
}
