use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::catalog::Entry;
use crate::ui::theme::Theme;

const BARRIER_KEY: &str = "block.minecraft.barrier";
const CAPTION_HEIGHT: u16 = 3;

/// Tick counter driving icon rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconClock {
    pub elapsed_ticks: u64,
    pub ticks_per_icon: u64,
}

impl IconClock {
    pub fn icon<'e>(&self, entry: &'e Entry) -> Option<&'e str> {
        entry.icon_at(self.elapsed_ticks, self.ticks_per_icon)
    }

    /// Display name of the icon currently shown for `entry`, or the barrier
    /// name when it has none.
    pub fn label(&self, entry: &Entry) -> String {
        match self.icon(entry) {
            Some(icon) => icon_label(icon),
            None => t!(BARRIER_KEY).to_string(),
        }
    }
}

/// `minecraft:iron_block` -> `Iron Block`.
pub fn icon_label(icon: &str) -> String {
    let id = icon.rsplit(':').next().unwrap_or(icon);
    id.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct EntryPage<'a> {
    entry: &'a Entry,
    icon_area: Rect,
    clock: IconClock,
    hovered: bool,
    theme: &'a Theme,
}

impl<'a> EntryPage<'a> {
    pub fn new(
        entry: &'a Entry,
        icon_area: Rect,
        clock: IconClock,
        theme: &'a Theme,
    ) -> Self {
        Self {
            entry,
            icon_area,
            clock,
            hovered: false,
            theme,
        }
    }

    pub fn hovered(mut self, hovered: bool) -> Self {
        self.hovered = hovered;
        self
    }
}

impl Widget for EntryPage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        if area.width == 0 || area.height == 0 {
            return;
        }
        let page_style = Style::default().fg(colors.ink()).bg(colors.page_bg());
        let label = self.clock.label(self.entry);

        let icon_style = if self.clock.icon(self.entry).is_some() {
            Style::default().fg(colors.icon()).bg(colors.page_bg())
        } else {
            Style::default().fg(colors.ink_dim()).bg(colors.page_bg())
        };
        let icon_block = Block::bordered().border_style(icon_style);
        let icon_inner = icon_block.inner(self.icon_area);
        icon_block.render(self.icon_area, buf);
        Paragraph::new(Line::from(Span::styled(label.as_str(), icon_style)))
            .centered()
            .render(icon_inner, buf);

        let name_x = self.icon_area.right().saturating_add(1).min(area.right());
        let name_area = Rect::new(
            name_x,
            area.y,
            area.right().saturating_sub(name_x),
            self.icon_area.height,
        );
        Paragraph::new(Line::from(Span::styled(
            self.entry.name.as_str(),
            page_style.fg(colors.accent()).add_modifier(Modifier::BOLD),
        )))
        .wrap(Wrap { trim: true })
        .render(name_area, buf);

        let desc_y = self.icon_area.bottom().saturating_add(1).min(area.bottom());
        let caption_h = if self.entry.supplemental_image.is_some() {
            CAPTION_HEIGHT.min(area.bottom().saturating_sub(desc_y))
        } else {
            0
        };
        let desc_area = Rect::new(
            area.x,
            desc_y,
            area.width,
            area.bottom().saturating_sub(desc_y).saturating_sub(caption_h),
        );
        let lines: Vec<Line> = self
            .entry
            .description
            .lines()
            .map(|l| Line::from(Span::styled(l, page_style)))
            .collect();
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(desc_area, buf);

        if let Some(image) = &self.entry.supplemental_image {
            let caption_area = Rect::new(area.x, desc_area.bottom(), area.width, caption_h);
            let block = Block::bordered().border_style(Style::default().fg(colors.page_border()));
            let inner = block.inner(caption_area);
            block.render(caption_area, buf);
            Paragraph::new(Line::from(Span::styled(
                t!("gui.image", image = image).to_string(),
                Style::default().fg(colors.ink_dim()),
            )))
            .centered()
            .render(inner, buf);
        }

        // Tooltip goes last so it sits over the description.
        if self.hovered {
            let tip = format!(" {label} ");
            let y = self.icon_area.bottom();
            if y < area.bottom() {
                buf.set_stringn(
                    self.icon_area.x,
                    y,
                    &tip,
                    area.right().saturating_sub(self.icon_area.x) as usize,
                    Style::default()
                        .fg(colors.tooltip_fg())
                        .bg(colors.tooltip_bg()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, RawEntry};

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_icon_label() {
        assert_eq!(icon_label("iron_block"), "Iron Block");
        assert_eq!(icon_label("minecraft:blue_stained_glass"), "Blue Stained Glass");
        assert_eq!(icon_label("tnt"), "Tnt");
        assert_eq!(icon_label(""), "");
    }

    #[test]
    fn test_clock_label_falls_back_to_barrier() {
        let catalog = Catalog::build([RawEntry::named("Ghost", 1.0)]);
        let entry = catalog.rank_order_at(0);
        let clock = IconClock {
            elapsed_ticks: 0,
            ticks_per_icon: 30,
        };
        assert_eq!(clock.label(entry), "Barrier");
    }

    #[test]
    fn test_clock_label_rotates() {
        let mut raw = RawEntry::named("Wool Golem", 1.0);
        raw.icons = vec!["white_wool".to_string(), "red_wool".to_string()];
        let catalog = Catalog::build([raw]);
        let entry = catalog.rank_order_at(0);
        let at = |t| IconClock {
            elapsed_ticks: t,
            ticks_per_icon: 30,
        };
        assert_eq!(at(0).label(entry), "White Wool");
        assert_eq!(at(30).label(entry), "Red Wool");
        assert_eq!(at(60).label(entry), "White Wool");
    }

    #[test]
    fn test_render_shows_name_and_tooltip() {
        let mut raw = RawEntry::named("Iron Golem", 1.0);
        raw.icons = vec!["iron_block".to_string()];
        let catalog = Catalog::build([raw]);
        let entry = catalog.rank_order_at(0);
        let theme = Theme::default();
        let clock = IconClock {
            elapsed_ticks: 0,
            ticks_per_icon: 30,
        };

        let area = Rect::new(0, 0, 40, 12);
        let icon_area = Rect::new(0, 0, 16, 3);
        let mut buf = Buffer::empty(area);
        EntryPage::new(entry, icon_area, clock, &theme)
            .hovered(true)
            .render(area, &mut buf);

        assert!(row_text(&buf, 0).contains("Iron Golem"));
        assert!(row_text(&buf, 1).contains("Iron Block"));
        assert!(row_text(&buf, 3).starts_with(" Iron Block "));
    }
}
