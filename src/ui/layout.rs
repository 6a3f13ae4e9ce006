use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::book::controls::{ControlKind, ControlList, Side};
use crate::book::navigation::Navigator;
use crate::book::scroll::{ScrollTrack, WINDOW_SIZE};

const MAX_BOOK_WIDTH: u16 = 104;
const MAX_BOOK_HEIGHT: u16 = 32;
const BUTTON_WIDTH: u16 = 10;
const ICON_WIDTH: u16 = 16;
const ICON_HEIGHT: u16 = 3;

/// Terminal rows per index entry.
pub const ROW_HEIGHT: u16 = 2;
const CONTENTS_TITLE_HEIGHT: u16 = 2;

/// Where everything sits for one terminal size. Rebuilt on resize; the
/// same rectangles drive drawing and hit testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookLayout {
    pub header: Rect,
    pub book: Rect,
    pub left_page: Rect,
    pub right_page: Rect,
    pub nav_row: Rect,
    pub prev_button: Rect,
    pub next_button: Rect,
    pub done_button: Rect,
    pub footer: Rect,
}

impl BookLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(6),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let body = vertical[1];
        let book_w = body.width.min(MAX_BOOK_WIDTH);
        let book_h = body.height.min(MAX_BOOK_HEIGHT);
        let book = Rect::new(
            body.x + (body.width - book_w) / 2,
            body.y + (body.height - book_h) / 2,
            book_w,
            book_h,
        );

        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(book);

        let nav_row = Rect::new(book.x, vertical[2].y, book.width, vertical[2].height);
        let button_w = BUTTON_WIDTH.min(nav_row.width / 3);
        let prev_button = Rect::new(nav_row.x, nav_row.y, button_w, nav_row.height);
        let next_button = Rect::new(
            nav_row.right().saturating_sub(button_w),
            nav_row.y,
            button_w,
            nav_row.height,
        );
        let done_button = Rect::new(
            nav_row.x + (nav_row.width.saturating_sub(button_w)) / 2,
            nav_row.y,
            button_w,
            nav_row.height,
        );

        Self {
            header: vertical[0],
            book,
            left_page: halves[0],
            right_page: halves[1],
            nav_row,
            prev_button,
            next_button,
            done_button,
            footer: vertical[3],
        }
    }

    pub fn page(&self, side: Side) -> Rect {
        match side {
            Side::Left => self.left_page,
            Side::Right => self.right_page,
        }
    }

    /// Page area inside its border, with the last row kept for the page
    /// number.
    pub fn page_body(&self, side: Side) -> Rect {
        let inner = inset(self.page(side), 1);
        Rect::new(
            inner.x,
            inner.y,
            inner.width,
            inner.height.saturating_sub(1),
        )
    }

    pub fn page_number_row(&self, side: Side) -> Rect {
        let inner = inset(self.page(side), 1);
        if inner.height == 0 {
            return Rect::new(inner.x, inner.y, inner.width, 0);
        }
        Rect::new(inner.x, inner.bottom() - 1, inner.width, 1)
    }

    /// Box holding the rotating icon of an entry page.
    pub fn icon(&self, side: Side) -> Rect {
        let body = self.page_body(side);
        Rect::new(
            body.x,
            body.y,
            ICON_WIDTH.min(body.width),
            ICON_HEIGHT.min(body.height),
        )
    }

    pub fn contents(&self, side: Side) -> ContentsLayout {
        ContentsLayout::new(self.page_body(side))
    }

    /// Track for the contents page currently on screen. A spread without
    /// the contents page gets the right page's geometry so the scroll
    /// state stays valid.
    pub fn scroll_track(&self, nav: &Navigator) -> ScrollTrack {
        let side = nav.contents_side().unwrap_or(Side::Right);
        self.contents(side).scroll_track()
    }

    /// Every interactive region for the current spread, in hit-test order.
    pub fn controls(&self, nav: &Navigator) -> ControlList {
        let flags = nav.flags();
        let mut list = ControlList::new();
        list.push(ControlKind::PrevPage, self.prev_button, flags.back_enabled);
        list.push(ControlKind::NextPage, self.next_button, flags.forward_enabled);
        list.push(ControlKind::Done, self.done_button, true);

        if let Some(side) = nav.contents_side() {
            let contents = self.contents(side);
            for (slot, row) in contents.rows.iter().enumerate() {
                list.push(
                    ControlKind::IndexRow(slot),
                    *row,
                    flags.contents_visible && slot < flags.index_rows.len(),
                );
            }
            list.push(ControlKind::ScrollTrack, contents.track, flags.contents_visible);
        }

        list.push(
            ControlKind::EntryIcon(Side::Left),
            self.icon(Side::Left),
            flags.left_icon.is_some(),
        );
        list.push(
            ControlKind::EntryIcon(Side::Right),
            self.icon(Side::Right),
            flags.right_icon.is_some(),
        );
        list
    }
}

/// Geometry of the contents page: title, one rect per index row and the
/// scrollbar column to their right.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentsLayout {
    pub title: Rect,
    pub rows: Vec<Rect>,
    pub track: Rect,
    pub hint: Rect,
}

impl ContentsLayout {
    pub fn new(body: Rect) -> Self {
        let title_h = CONTENTS_TITLE_HEIGHT.min(body.height);
        let title = Rect::new(body.x, body.y, body.width, title_h);

        let list_h = (WINDOW_SIZE as u16 * ROW_HEIGHT).min(body.height - title_h);
        let list = Rect::new(body.x, body.y + title_h, body.width, list_h);

        let track = Rect::new(
            list.right().saturating_sub(1),
            list.y,
            list.width.min(1),
            list.height,
        );

        let row_w = list.width.saturating_sub(2);
        let rows = (0..WINDOW_SIZE as u16)
            .map(|i| {
                let y = list.y + i * ROW_HEIGHT;
                let h = ROW_HEIGHT.min(list.bottom().saturating_sub(y));
                Rect::new(list.x, y.min(list.bottom()), row_w, h)
            })
            .collect();

        let hint_y = list.bottom();
        let hint = Rect::new(
            body.x,
            hint_y,
            body.width,
            body.bottom().saturating_sub(hint_y),
        );

        Self {
            title,
            rows,
            track,
            hint,
        }
    }

    /// Thumb is one row tall, so the travel is the track height less one.
    pub fn scroll_track(&self) -> ScrollTrack {
        ScrollTrack::new(self.track.y as i32, self.track.height as i32 - 1)
    }
}

fn inset(area: Rect, margin: u16) -> Rect {
    let w = area.width.saturating_sub(margin * 2);
    let h = area.height.saturating_sub(margin * 2);
    Rect::new(area.x + margin.min(area.width), area.y + margin.min(area.height), w, h)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::book::navigation::Step;
    use crate::book::pagination::Pagination;
    use crate::book::scroll::ScrollWindow;
    use crate::catalog::{Catalog, RawEntry};

    fn navigator(n: usize) -> Navigator {
        let catalog = Arc::new(Catalog::build(
            (0..n).map(|i| RawEntry::named(&format!("Golem {i:02}"), i as f32)),
        ));
        let pagination = Pagination::new(Arc::clone(&catalog));
        let scroll = ScrollWindow::new(catalog, WINDOW_SIZE, ScrollTrack::default());
        Navigator::new(pagination, scroll)
    }

    #[test]
    fn test_book_fits_inside_area() {
        let area = Rect::new(0, 0, 200, 60);
        let layout = BookLayout::new(area);
        assert_eq!(layout.book.width, MAX_BOOK_WIDTH);
        assert_eq!(layout.book.height, MAX_BOOK_HEIGHT);
        assert!(layout.left_page.right() <= layout.right_page.x);
        assert_eq!(layout.left_page.width + layout.right_page.width, layout.book.width);
    }

    #[test]
    fn test_buttons_do_not_overlap() {
        let layout = BookLayout::new(Rect::new(0, 0, 120, 40));
        assert!(!layout.prev_button.intersects(layout.done_button));
        assert!(!layout.done_button.intersects(layout.next_button));
    }

    #[test]
    fn test_contents_rows_and_track() {
        let body = Rect::new(2, 2, 40, 20);
        let contents = ContentsLayout::new(body);
        assert_eq!(contents.rows.len(), WINDOW_SIZE);
        assert_eq!(contents.rows[0].y, 4);
        assert_eq!(contents.rows[4].y, 4 + 4 * ROW_HEIGHT);
        assert_eq!(contents.track.x, 41);
        assert_eq!(contents.track.height, WINDOW_SIZE as u16 * ROW_HEIGHT);
        let track = contents.scroll_track();
        assert_eq!(track.top, 4);
        assert_eq!(track.travel, 9);
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let layout = BookLayout::new(Rect::new(0, 0, 3, 2));
        let contents = layout.contents(Side::Right);
        assert_eq!(contents.rows.len(), WINDOW_SIZE);
        assert_eq!(contents.scroll_track().travel, 0);
    }

    #[test]
    fn test_controls_on_contents_spread() {
        let nav = navigator(16);
        let layout = BookLayout::new(Rect::new(0, 0, 120, 40));
        let controls = layout.controls(&nav);

        let prev = controls.get(ControlKind::PrevPage).unwrap();
        assert!(!prev.enabled);
        assert!(controls.get(ControlKind::NextPage).unwrap().enabled);
        assert!(controls.get(ControlKind::ScrollTrack).unwrap().enabled);

        let row = controls.get(ControlKind::IndexRow(0)).unwrap();
        assert!(row.enabled);
        let hit = controls.hit_test(row.bounds.x, row.bounds.y);
        assert_eq!(hit, Some(ControlKind::IndexRow(0)));
    }

    #[test]
    fn test_short_catalog_disables_extra_rows() {
        let nav = navigator(2);
        let layout = BookLayout::new(Rect::new(0, 0, 120, 40));
        let controls = layout.controls(&nav);
        assert!(controls.get(ControlKind::IndexRow(1)).unwrap().enabled);
        assert!(!controls.get(ControlKind::IndexRow(2)).unwrap().enabled);
    }

    #[test]
    fn test_controls_on_entry_spread() {
        let mut nav = navigator(16);
        nav.step_page(Step::Forward);
        nav.step_page(Step::Forward);
        nav.step_page(Step::Forward);
        assert_eq!(nav.current_page(), 6);

        let layout = BookLayout::new(Rect::new(0, 0, 120, 40));
        let controls = layout.controls(&nav);
        assert!(controls.get(ControlKind::ScrollTrack).is_none());
        assert!(controls.get(ControlKind::IndexRow(0)).is_none());
        let icon = controls.get(ControlKind::EntryIcon(Side::Left)).unwrap();
        assert!(icon.enabled);
        assert_eq!(
            controls.hit_test(icon.bounds.x, icon.bounds.y),
            Some(ControlKind::EntryIcon(Side::Left))
        );
    }
}
