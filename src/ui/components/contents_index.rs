use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::book::navigation::Navigator;
use crate::ui::components::entry_page::IconClock;
use crate::ui::layout::ContentsLayout;
use crate::ui::theme::Theme;

/// Contents page: title, the visible window of the name-ordered index and
/// the scrollbar beside it.
pub struct ContentsIndex<'a> {
    nav: &'a Navigator,
    layout: &'a ContentsLayout,
    clock: IconClock,
    hovered_row: Option<usize>,
    theme: &'a Theme,
}

impl<'a> ContentsIndex<'a> {
    pub fn new(
        nav: &'a Navigator,
        layout: &'a ContentsLayout,
        clock: IconClock,
        theme: &'a Theme,
    ) -> Self {
        Self {
            nav,
            layout,
            clock,
            hovered_row: None,
            theme,
        }
    }

    pub fn hovered_row(mut self, slot: Option<usize>) -> Self {
        self.hovered_row = slot;
        self
    }

    fn render_rows(&self, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let catalog = self.nav.catalog();
        let rows = &self.nav.flags().index_rows;

        for (slot, (area, id)) in self.layout.rows.iter().zip(rows).enumerate() {
            if area.height == 0 {
                continue;
            }
            let Some(entry) = catalog.get(*id) else {
                continue;
            };
            let bg = if self.hovered_row == Some(slot) {
                colors.row_hover_bg()
            } else {
                colors.row_bg()
            };
            buf.set_style(*area, Style::default().bg(bg));

            let label = self.clock.label(entry);
            let name_line = Line::from(vec![
                Span::styled(format!("{}. ", slot + 1), Style::default().fg(colors.ink_dim())),
                Span::styled(
                    entry.name.as_str(),
                    Style::default().fg(colors.ink()).add_modifier(Modifier::BOLD),
                ),
            ]);
            buf.set_line(area.x, area.y, &name_line, area.width);
            if area.height > 1 {
                buf.set_stringn(
                    area.x + 3,
                    area.y + 1,
                    &label,
                    area.width.saturating_sub(3) as usize,
                    Style::default().fg(colors.icon()).bg(bg),
                );
            }
        }
    }

    fn render_scrollbar(&self, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let track = self.layout.track;
        if track.width == 0 || track.height == 0 {
            return;
        }
        let track_style = Style::default().fg(colors.track()).bg(colors.page_bg());
        for y in track.y..track.bottom() {
            buf.set_string(track.x, y, "│", track_style);
        }

        let scroll = self.nav.scroll();
        let thumb_fg = if scroll.is_dragging() {
            colors.thumb_active()
        } else {
            colors.thumb()
        };
        let thumb_y = scroll.thumb_pixel().clamp(track.y as i32, track.bottom() as i32 - 1);
        buf.set_string(
            track.x,
            thumb_y as u16,
            "█",
            Style::default().fg(thumb_fg).bg(colors.page_bg()),
        );
    }
}

impl Widget for ContentsIndex<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let page_style = Style::default().fg(colors.ink()).bg(colors.page_bg());

        Paragraph::new(Line::from(Span::styled(
            t!("golembook.contents.title"),
            page_style.fg(colors.accent()).add_modifier(Modifier::BOLD),
        )))
        .centered()
        .render(self.layout.title, buf);

        if self.nav.catalog().is_empty() {
            let list = self
                .layout
                .rows
                .first()
                .copied()
                .unwrap_or(self.layout.title);
            Paragraph::new(Line::from(Span::styled(
                t!("golembook.contents.empty"),
                page_style.fg(colors.ink_dim()),
            )))
            .render(list, buf);
        } else {
            self.render_rows(buf);
        }
        self.render_scrollbar(buf);

        Paragraph::new(Line::from(Span::styled(
            t!("golembook.contents.hint"),
            page_style.fg(colors.ink_dim()).add_modifier(Modifier::ITALIC),
        )))
        .wrap(Wrap { trim: true })
        .render(self.layout.hint, buf);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::book::pagination::Pagination;
    use crate::book::scroll::{ScrollWindow, WINDOW_SIZE};
    use crate::catalog::{Catalog, RawEntry};

    fn navigator(names: &[&str], layout: &ContentsLayout) -> Navigator {
        let catalog = Arc::new(Catalog::build(
            names.iter().enumerate().map(|(i, n)| RawEntry::named(n, i as f32)),
        ));
        let pagination = Pagination::new(Arc::clone(&catalog));
        let scroll = ScrollWindow::new(catalog, WINDOW_SIZE, layout.scroll_track());
        Navigator::new(pagination, scroll)
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    fn clock() -> IconClock {
        IconClock {
            elapsed_ticks: 0,
            ticks_per_icon: 30,
        }
    }

    #[test]
    fn test_rows_follow_name_order() {
        let area = Rect::new(0, 0, 30, 16);
        let layout = ContentsLayout::new(area);
        let nav = navigator(&["Stone", "Clay", "Wool"], &layout);
        let theme = Theme::default();
        let mut buf = Buffer::empty(area);
        ContentsIndex::new(&nav, &layout, clock(), &theme).render(area, &mut buf);

        assert!(row_text(&buf, 0).contains("Contents"));
        assert!(row_text(&buf, layout.rows[0].y).contains("1. Clay"));
        assert!(row_text(&buf, layout.rows[1].y).contains("2. Stone"));
        assert!(row_text(&buf, layout.rows[2].y).contains("3. Wool"));
        assert!(row_text(&buf, layout.rows[1].y + 1).contains("Barrier"));
    }

    #[test]
    fn test_thumb_drawn_at_track_top() {
        let area = Rect::new(0, 0, 30, 16);
        let layout = ContentsLayout::new(area);
        let names: Vec<String> = (0..12).map(|i| format!("Golem {i:02}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let nav = navigator(&refs, &layout);
        let theme = Theme::default();
        let mut buf = Buffer::empty(area);
        ContentsIndex::new(&nav, &layout, clock(), &theme).render(area, &mut buf);

        assert_eq!(buf[(layout.track.x, layout.track.y)].symbol(), "█");
        assert_eq!(buf[(layout.track.x, layout.track.y + 1)].symbol(), "│");
    }

    #[test]
    fn test_empty_catalog_message() {
        let area = Rect::new(0, 0, 40, 16);
        let layout = ContentsLayout::new(area);
        let nav = navigator(&[], &layout);
        let theme = Theme::default();
        let mut buf = Buffer::empty(area);
        ContentsIndex::new(&nav, &layout, clock(), &theme).render(area, &mut buf);
        assert!(row_text(&buf, layout.rows[0].y).contains("No golems"));
    }
}
