use std::sync::Arc;

use crate::book::controls::Side;
use crate::book::pagination::{PageKind, Pagination};
use crate::book::scroll::{ScrollTrack, ScrollWindow};
use crate::catalog::{Catalog, EntryId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Forward,
    Back,
}

/// Which controls are live for the current spread and index window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityFlags {
    /// The contents page is on screen: index rows are shown and the
    /// scrollbar accepts drags.
    pub contents_visible: bool,
    pub back_enabled: bool,
    pub forward_enabled: bool,
    /// Entry whose icons rotate on the left page, if it is an entry page.
    pub left_icon: Option<EntryId>,
    pub right_icon: Option<EntryId>,
    /// Entries in the index rows, top to bottom. Empty unless
    /// `contents_visible`.
    pub index_rows: Vec<EntryId>,
}

/// Owns the page cursor and the index scroll state and keeps the
/// visibility flags in step with both.
#[derive(Clone, Debug)]
pub struct Navigator {
    pagination: Pagination,
    scroll: ScrollWindow,
    cur_page: usize,
    flags: VisibilityFlags,
}

impl Navigator {
    pub fn new(pagination: Pagination, scroll: ScrollWindow) -> Self {
        let mut nav = Self {
            pagination,
            scroll,
            cur_page: 0,
            flags: VisibilityFlags::default(),
        };
        nav.refresh_visibility();
        nav
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        self.pagination.catalog()
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn scroll(&self) -> &ScrollWindow {
        &self.scroll
    }

    pub fn current_page(&self) -> usize {
        self.cur_page
    }

    pub fn flags(&self) -> &VisibilityFlags {
        &self.flags
    }

    /// Either page of the current spread is the contents page.
    pub fn contents_showing(&self) -> bool {
        self.contents_side().is_some()
    }

    /// The page of the current spread that holds the contents, if any.
    pub fn contents_side(&self) -> Option<Side> {
        if self.pagination.page_kind(self.cur_page) == PageKind::Contents {
            Some(Side::Left)
        } else if self.pagination.page_kind(self.cur_page + 1) == PageKind::Contents {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Move one spread. A step that is not allowed does nothing.
    pub fn step_page(&mut self, step: Step) -> bool {
        let moved = match step {
            Step::Forward if self.pagination.can_go_forward(self.cur_page) => {
                self.cur_page += 2;
                true
            }
            Step::Back if self.pagination.can_go_back(self.cur_page) => {
                self.cur_page -= 2;
                true
            }
            _ => false,
        };
        if moved {
            self.after_cursor_change();
        }
        moved
    }

    /// Open the spread holding `id`. Unknown entries leave everything as is.
    pub fn jump(&mut self, id: EntryId) -> bool {
        match self.pagination.jump_to_entry(id) {
            Some(page) => {
                tracing::debug!(entry = id.index(), page, "jump to entry");
                self.cur_page = page;
                self.after_cursor_change();
                true
            }
            None => {
                tracing::debug!(entry = id.index(), "jump target not in catalog");
                false
            }
        }
    }

    /// Jump to the entry shown in index row `slot`.
    pub fn activate_index_row(&mut self, slot: usize) -> bool {
        match self.flags.index_rows.get(slot).copied() {
            Some(id) => self.jump(id),
            None => false,
        }
    }

    pub fn go_to_start(&mut self) {
        if self.cur_page != 0 {
            self.cur_page = 0;
            self.after_cursor_change();
        }
    }

    /// Show the spread containing `page`. Pages past the end are refused.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page >= self.pagination.total_pages() {
            return false;
        }
        self.cur_page = Pagination::spread_start(page);
        self.after_cursor_change();
        true
    }

    /// Recompute every flag from the cursor and scroll state.
    pub fn refresh_visibility(&mut self) {
        let left = self.cur_page;
        let right = self.cur_page + 1;
        let contents_visible = self.contents_showing();

        let index_rows = if contents_visible {
            self.scroll.visible().iter().map(|e| e.id()).collect()
        } else {
            Vec::new()
        };

        self.flags = VisibilityFlags {
            contents_visible,
            back_enabled: self.pagination.can_go_back(left),
            forward_enabled: self.pagination.can_go_forward(left),
            left_icon: self.pagination.entry_for_page(left).map(|e| e.id()),
            right_icon: self.pagination.entry_for_page(right).map(|e| e.id()),
            index_rows,
        };
    }

    pub fn set_track(&mut self, track: ScrollTrack) {
        self.scroll.set_track(track);
    }

    /// Press on the scrollbar: engage the drag and jump the thumb to the
    /// pointer. Ignored unless the contents page is showing.
    pub fn begin_drag(&mut self, y: i32) -> bool {
        if !self.flags.contents_visible {
            return false;
        }
        self.scroll.begin_drag();
        self.scroll.drag_to(y);
        self.refresh_visibility();
        true
    }

    pub fn drag_to(&mut self, y: i32) -> bool {
        if !self.scroll.drag_to(y) {
            return false;
        }
        self.refresh_visibility();
        true
    }

    pub fn end_drag(&mut self) {
        self.scroll.end_drag();
    }

    pub fn wheel(&mut self, notches: i32) -> bool {
        if !self.flags.contents_visible {
            return false;
        }
        self.scroll.on_wheel(notches);
        self.refresh_visibility();
        true
    }

    pub fn scroll_rows(&mut self, rows: isize) -> bool {
        if !self.flags.contents_visible {
            return false;
        }
        self.scroll.scroll_rows(rows);
        self.refresh_visibility();
        true
    }

    fn after_cursor_change(&mut self) {
        if !self.contents_showing() {
            self.scroll.end_drag();
        }
        self.refresh_visibility();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::scroll::WINDOW_SIZE;
    use crate::catalog::RawEntry;

    fn navigator(n: usize) -> Navigator {
        let catalog = Arc::new(Catalog::build(
            (0..n).map(|i| RawEntry::named(&format!("Golem {i:02}"), i as f32)),
        ));
        let pagination = Pagination::new(Arc::clone(&catalog));
        let scroll = ScrollWindow::new(catalog, WINDOW_SIZE, ScrollTrack::new(0, 10));
        Navigator::new(pagination, scroll)
    }

    #[test]
    fn test_initial_flags() {
        let nav = navigator(16);
        let flags = nav.flags();
        assert!(flags.contents_visible);
        assert!(!flags.back_enabled);
        assert!(flags.forward_enabled);
        assert_eq!(flags.left_icon, None);
        assert_eq!(flags.right_icon, None);
        assert_eq!(flags.index_rows.len(), WINDOW_SIZE);
    }

    #[test]
    fn test_contents_side_follows_cursor() {
        let mut nav = navigator(16);
        assert_eq!(nav.contents_side(), Some(Side::Right));
        nav.step_page(Step::Forward);
        assert_eq!(nav.contents_side(), None);
        assert!(!nav.contents_showing());
    }

    #[test]
    fn test_step_forward_and_back() {
        let mut nav = navigator(16);
        assert!(nav.step_page(Step::Forward));
        assert_eq!(nav.current_page(), 2);
        assert!(!nav.flags().contents_visible);
        assert!(nav.flags().index_rows.is_empty());
        assert!(nav.step_page(Step::Back));
        assert_eq!(nav.current_page(), 0);
        assert!(!nav.step_page(Step::Back));
        assert_eq!(nav.current_page(), 0);
    }

    #[test]
    fn test_step_stops_at_last_spread() {
        let mut nav = navigator(16);
        while nav.step_page(Step::Forward) {}
        assert_eq!(nav.current_page(), 20);
        assert!(!nav.flags().forward_enabled);
        assert!(nav.flags().back_enabled);
        let before = nav.flags().clone();
        assert!(!nav.step_page(Step::Forward));
        assert_eq!(nav.flags(), &before);
    }

    #[test]
    fn test_entry_spread_sets_icons() {
        let mut nav = navigator(3);
        nav.set_page(6);
        let catalog = Arc::clone(nav.catalog());
        assert_eq!(nav.flags().left_icon, Some(catalog.rank_order_at(0).id()));
        assert_eq!(nav.flags().right_icon, Some(catalog.rank_order_at(1).id()));
        nav.set_page(8);
        assert_eq!(nav.flags().left_icon, Some(catalog.rank_order_at(2).id()));
        assert_eq!(nav.flags().right_icon, None);
    }

    #[test]
    fn test_jump_to_known_entry() {
        let mut nav = navigator(16);
        let target = nav.catalog().rank_order_at(7).id();
        assert!(nav.jump(target));
        assert_eq!(nav.current_page(), 12);
        assert_eq!(nav.flags().right_icon, Some(target));
    }

    #[test]
    fn test_jump_to_absent_entry_keeps_state() {
        let mut nav = navigator(4);
        nav.step_page(Step::Forward);
        let before = (nav.current_page(), nav.flags().clone());
        let other = Catalog::build((0..3).map(|i| RawEntry::named("Other", i as f32)));
        assert!(!nav.jump(other.rank_order_at(2).id()));
        assert_eq!((nav.current_page(), nav.flags().clone()), before);
    }

    #[test]
    fn test_jump_with_id_from_other_catalog_is_not_found() {
        let other = Catalog::build((0..3).map(|i| RawEntry::named("Other", i as f32)));
        let mut nav = navigator(16);
        assert!(!nav.jump(other.rank_order_at(2).id()));
        assert_eq!(nav.current_page(), 0);
        assert!(nav.flags().contents_visible);
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut nav = navigator(16);
        nav.wheel(3);
        nav.refresh_visibility();
        let first = nav.flags().clone();
        nav.refresh_visibility();
        assert_eq!(nav.flags(), &first);
    }

    #[test]
    fn test_drag_needs_contents_page() {
        let mut nav = navigator(16);
        nav.step_page(Step::Forward);
        assert!(!nav.begin_drag(5));
        assert!(!nav.scroll().is_dragging());
        assert!(!nav.wheel(1));
        assert!(!nav.scroll_rows(1));
    }

    #[test]
    fn test_drag_updates_index_rows() {
        let mut nav = navigator(16);
        assert!(nav.begin_drag(10));
        let last: Vec<EntryId> = (11..16).map(|i| nav.catalog().name_order_at(i).id()).collect();
        assert_eq!(nav.flags().index_rows, last);
        assert!(nav.drag_to(0));
        assert_eq!(nav.flags().index_rows[0], nav.catalog().name_order_at(0).id());
        nav.end_drag();
        assert!(!nav.drag_to(10));
    }

    #[test]
    fn test_leaving_contents_ends_drag() {
        let mut nav = navigator(16);
        nav.begin_drag(4);
        nav.step_page(Step::Forward);
        assert!(!nav.scroll().is_dragging());
    }

    #[test]
    fn test_index_row_activation() {
        let mut nav = navigator(16);
        let expected = nav.flags().index_rows[2];
        assert!(nav.activate_index_row(2));
        assert!(
            nav.flags().left_icon == Some(expected) || nav.flags().right_icon == Some(expected)
        );
        assert!(!nav.activate_index_row(0));
    }

    #[test]
    fn test_empty_catalog_navigation() {
        let mut nav = navigator(0);
        assert!(nav.flags().index_rows.is_empty());
        assert!(nav.step_page(Step::Forward));
        assert!(nav.step_page(Step::Forward));
        assert!(!nav.step_page(Step::Forward));
        assert_eq!(nav.current_page(), 4);
        assert_eq!(nav.flags().left_icon, None);
        let other = Catalog::build([RawEntry::named("Other", 1.0)]);
        assert!(!nav.jump(other.rank_order_at(0).id()));
    }

    #[test]
    fn test_set_page_snaps_and_rejects_past_end() {
        let mut nav = navigator(3);
        assert!(nav.set_page(7));
        assert_eq!(nav.current_page(), 6);
        assert!(!nav.set_page(9));
        assert_eq!(nav.current_page(), 6);
        nav.go_to_start();
        assert_eq!(nav.current_page(), 0);
    }
}
