use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use rust_i18n::t;

use crate::book::navigation::Navigator;
use crate::ui::theme::Theme;

/// Book title, page position and catalog size across the top row.
pub struct HeaderBar<'a> {
    nav: &'a Navigator,
    theme: &'a Theme,
}

impl<'a> HeaderBar<'a> {
    pub fn new(nav: &'a Navigator, theme: &'a Theme) -> Self {
        Self { nav, theme }
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let style = Style::default().fg(colors.header_fg()).bg(colors.header_bg());

        let total = self.nav.pagination().total_pages();
        let current = (self.nav.current_page() + 1).min(total);
        let page_info = t!("gui.page", current = current, total = total);
        let count = t!("gui.golem_count", count = self.nav.catalog().len());

        Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {} ", t!("item.golems.info_book")),
                style.add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {page_info} | {count}"), style),
        ]))
        .style(Style::default().bg(colors.header_bg()))
        .render(area, buf);
    }
}

/// Status message when there is one, key hints otherwise.
pub struct FooterBar<'a> {
    status: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> FooterBar<'a> {
    pub fn new(status: Option<&'a str>, theme: &'a Theme) -> Self {
        Self { status, theme }
    }
}

impl Widget for FooterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let span = match self.status {
            Some(status) => Span::styled(
                format!(" {status} "),
                Style::default().fg(colors.warning()),
            ),
            None => Span::styled(
                format!(" {} ", t!("gui.key_hints")),
                Style::default().fg(colors.fg()),
            ),
        };
        Paragraph::new(Line::from(span)).render(area, buf);
    }
}
