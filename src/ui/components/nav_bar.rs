use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use rust_i18n::t;

use crate::book::controls::ControlKind;
use crate::book::navigation::VisibilityFlags;
use crate::ui::layout::BookLayout;
use crate::ui::theme::Theme;

/// Page arrows and the Done button under the book. Disabled arrows are not
/// drawn at all.
pub struct NavBar<'a> {
    layout: &'a BookLayout,
    flags: &'a VisibilityFlags,
    hovered: Option<ControlKind>,
    theme: &'a Theme,
}

impl<'a> NavBar<'a> {
    pub fn new(
        layout: &'a BookLayout,
        flags: &'a VisibilityFlags,
        hovered: Option<ControlKind>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            layout,
            flags,
            hovered,
            theme,
        }
    }

    fn button(&self, buf: &mut Buffer, area: Rect, label: &str, kind: ControlKind) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let colors = &self.theme.colors;
        let style = if self.hovered == Some(kind) {
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.header_fg()).bg(colors.header_bg())
        };
        buf.set_style(area, style);
        let shown: String = label.chars().take(area.width as usize).collect();
        let x = area.x + (area.width.saturating_sub(shown.chars().count() as u16)) / 2;
        buf.set_string(x, area.y, &shown, style);
    }
}

impl Widget for NavBar<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        if self.flags.back_enabled {
            self.button(buf, self.layout.prev_button, &t!("gui.prev"), ControlKind::PrevPage);
        }
        self.button(buf, self.layout.done_button, &t!("gui.done"), ControlKind::Done);
        if self.flags.forward_enabled {
            self.button(buf, self.layout.next_button, &t!("gui.next"), ControlKind::NextPage);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_disabled_arrows_hidden() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = BookLayout::new(area);
        let flags = VisibilityFlags {
            forward_enabled: true,
            ..VisibilityFlags::default()
        };
        let theme = Theme::default();
        let mut buf = Buffer::empty(area);
        NavBar::new(&layout, &flags, None, &theme).render(area, &mut buf);

        let row = row_text(&buf, layout.nav_row.y);
        assert!(!row.contains("Prev"));
        assert!(row.contains("Done"));
        assert!(row.contains("Next"));
    }
}
