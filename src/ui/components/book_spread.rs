use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::book::controls::{ControlKind, Side};
use crate::book::navigation::Navigator;
use crate::book::pagination::PageKind;
use crate::book::recipe::{HEAD_RECIPE, Recipe, SPELL_RECIPE};
use crate::ui::components::contents_index::ContentsIndex;
use crate::ui::components::entry_page::{EntryPage, IconClock};
use crate::ui::components::nav_bar::NavBar;
use crate::ui::components::recipe_grid::{GolemDiagram, RecipeGrid};
use crate::ui::layout::BookLayout;
use crate::ui::theme::Theme;

/// Both pages of the current spread plus the controls underneath.
pub struct BookSpread<'a> {
    nav: &'a Navigator,
    layout: &'a BookLayout,
    clock: IconClock,
    hovered: Option<ControlKind>,
    theme: &'a Theme,
}

impl<'a> BookSpread<'a> {
    pub fn new(
        nav: &'a Navigator,
        layout: &'a BookLayout,
        clock: IconClock,
        theme: &'a Theme,
    ) -> Self {
        Self {
            nav,
            layout,
            clock,
            hovered: None,
            theme,
        }
    }

    pub fn hovered(mut self, hovered: Option<ControlKind>) -> Self {
        self.hovered = hovered;
        self
    }

    fn page_style(&self) -> Style {
        let colors = &self.theme.colors;
        Style::default().fg(colors.ink()).bg(colors.page_bg())
    }

    fn render_page(&self, side: Side, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let outer = self.layout.page(side);
        let block = Block::bordered()
            .border_style(Style::default().fg(colors.page_border()))
            .style(self.page_style());
        block.render(outer, buf);

        let page = match side {
            Side::Left => self.nav.current_page(),
            Side::Right => self.nav.current_page() + 1,
        };
        let kind = self.nav.pagination().page_kind(page);
        let body = self.layout.page_body(side);

        match kind {
            PageKind::Welcome => self.render_welcome(body, buf),
            PageKind::Contents => {
                let contents = self.layout.contents(side);
                let hovered_row = match self.hovered {
                    Some(ControlKind::IndexRow(slot)) => Some(slot),
                    _ => None,
                };
                ContentsIndex::new(self.nav, &contents, self.clock, self.theme)
                    .hovered_row(hovered_row)
                    .render(body, buf);
            }
            PageKind::SpellRecipe => self.render_spell_recipe(body, buf),
            PageKind::HeadRecipe => self.render_head_recipe(body, buf),
            PageKind::BuildInstructions => self.render_instructions(body, buf),
            PageKind::Diagram => self.render_diagram(body, buf),
            PageKind::Entry(_) => {
                if let Some(entry) = self.nav.pagination().entry_for_page(page) {
                    EntryPage::new(entry, self.layout.icon(side), self.clock, self.theme)
                    .hovered(self.hovered == Some(ControlKind::EntryIcon(side)))
                    .render(body, buf);
                }
            }
            PageKind::Blank => {}
        }

        if kind != PageKind::Blank {
            let alignment = match side {
                Side::Left => Alignment::Right,
                Side::Right => Alignment::Left,
            };
            Paragraph::new(Line::from(Span::styled(
                (page + 1).to_string(),
                self.page_style().fg(colors.ink_dim()),
            )))
            .alignment(alignment)
            .render(self.layout.page_number_row(side), buf);
        }
    }

    /// Bold title line, a blank line, then wrapped paragraphs.
    fn render_text_page(
        &self,
        area: Rect,
        title: &str,
        paragraphs: &[String],
        buf: &mut Buffer,
    ) {
        let colors = &self.theme.colors;
        let mut lines = vec![
            Line::from(Span::styled(
                title.to_string(),
                self.page_style()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::default(),
        ];
        for (i, para) in paragraphs.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            lines.push(Line::from(Span::styled(para.clone(), self.page_style())));
        }
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_welcome(&self, area: Rect, buf: &mut Buffer) {
        self.render_text_page(
            area,
            &t!("item.golems.info_book"),
            &[
                t!("golembook.intro1").to_string(),
                t!("golembook.intro2").to_string(),
            ],
            buf,
        );
    }

    fn render_spell_recipe(&self, area: Rect, buf: &mut Buffer) {
        let sentence = t!(
            "golembook.recipe_spell.recipe",
            output = t!(SPELL_RECIPE.output),
            first = ingredient(&SPELL_RECIPE, 0),
            second = ingredient(&SPELL_RECIPE, 1),
            third = ingredient(&SPELL_RECIPE, 2),
            fourth = ingredient(&SPELL_RECIPE, 3)
        )
        .to_string();
        let title = t!(SPELL_RECIPE.output).to_string();
        let grid = RecipeGrid::new(SPELL_RECIPE, self.theme);
        self.render_recipe(area, &title, sentence, grid, buf);
    }

    fn render_head_recipe(&self, area: Rect, buf: &mut Buffer) {
        let sentence = t!(
            "golembook.recipe_head.recipe",
            top = t!("item.golems.golem_paper"),
            base = t!("block.minecraft.carved_pumpkin"),
            output = t!(HEAD_RECIPE.output)
        )
        .to_string();
        let title = t!(HEAD_RECIPE.output).to_string();
        let grid = RecipeGrid::new(HEAD_RECIPE, self.theme);
        self.render_recipe(area, &title, sentence, grid, buf);
    }

    fn render_recipe(
        &self,
        area: Rect,
        title: &str,
        sentence: String,
        grid: RecipeGrid<'_>,
        buf: &mut Buffer,
    ) {
        let (grid_w, grid_h) = RecipeGrid::size();
        let grid_area = Rect::new(
            area.x + area.width.saturating_sub(grid_w) / 2,
            area.y + area.height.min(2),
            grid_w.min(area.width),
            grid_h.min(area.height.saturating_sub(2)),
        );
        let text_y = grid_area.bottom().saturating_add(1).min(area.bottom());
        let text_area = Rect::new(area.x, text_y, area.width, area.bottom() - text_y);

        let title_area = Rect::new(area.x, area.y, area.width, area.height.min(2));
        self.render_text_page(title_area, title, &[], buf);
        grid.render(grid_area, buf);
        Paragraph::new(Line::from(Span::styled(sentence, self.page_style())))
            .wrap(Wrap { trim: true })
            .render(text_area, buf);
    }

    fn render_instructions(&self, area: Rect, buf: &mut Buffer) {
        self.render_text_page(
            area,
            &t!("golembook.build_golem.title"),
            &[
                t!("golembook.build_golem.howto1").to_string(),
                t!("golembook.build_golem.howto2").to_string(),
                t!(
                    "golembook.build_golem.howto3",
                    head = t!("block.golems.golem_head")
                )
                .to_string(),
            ],
            buf,
        );
    }

    fn render_diagram(&self, area: Rect, buf: &mut Buffer) {
        let (w, h) = GolemDiagram::size();
        self.render_text_page(
            Rect::new(area.x, area.y, area.width, area.height.min(2)),
            &t!("golembook.build_golem.diagram"),
            &[],
            buf,
        );
        let grid_area = Rect::new(
            area.x + area.width.saturating_sub(w) / 2,
            area.y + area.height.min(2),
            w.min(area.width),
            h.min(area.height.saturating_sub(2)),
        );
        GolemDiagram::new(self.theme).render(grid_area, buf);
    }
}

/// Display name of the `i`th ingredient, empty past the end of the list.
fn ingredient(recipe: &Recipe, i: usize) -> String {
    match recipe.ingredients.get(i) {
        Some(&key) => t!(key).to_string(),
        None => String::new(),
    }
}

impl Widget for BookSpread<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        self.render_page(Side::Left, buf);
        self.render_page(Side::Right, buf);
        NavBar::new(self.layout, self.nav.flags(), self.hovered, self.theme)
            .render(self.layout.nav_row, buf);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::book::navigation::Step;
    use crate::book::pagination::Pagination;
    use crate::book::scroll::{ScrollWindow, WINDOW_SIZE};
    use crate::catalog::{Catalog, RawEntry};

    fn setup(n: usize, area: Rect) -> (Navigator, BookLayout) {
        let catalog = Arc::new(Catalog::build(
            (0..n).map(|i| RawEntry::named(&format!("Golem {i:02}"), i as f32)),
        ));
        let layout = BookLayout::new(area);
        let pagination = Pagination::new(Arc::clone(&catalog));
        let track = layout.contents(Side::Right).scroll_track();
        let scroll = ScrollWindow::new(catalog, WINDOW_SIZE, track);
        (Navigator::new(pagination, scroll), layout)
    }

    fn buffer_text(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in buf.area.y..buf.area.bottom() {
            for x in buf.area.x..buf.area.right() {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn clock() -> IconClock {
        IconClock {
            elapsed_ticks: 0,
            ticks_per_icon: 30,
        }
    }

    #[test]
    fn test_first_spread_shows_welcome_and_contents() {
        let area = Rect::new(0, 0, 120, 40);
        let (nav, layout) = setup(8, area);
        let theme = Theme::default();
        let mut buf = Buffer::empty(area);
        BookSpread::new(&nav, &layout, clock(), &theme).render(area, &mut buf);

        let rendered = buffer_text(&buf);
        assert!(rendered.contains("Golem Guide"));
        assert!(rendered.contains("Contents"));
        assert!(rendered.contains("Golem 00"));
        assert!(rendered.contains("Next"));
        assert!(!rendered.contains("Prev"));
    }

    #[test]
    fn test_entry_spread_and_page_numbers() {
        let area = Rect::new(0, 0, 120, 40);
        let (mut nav, layout) = setup(3, area);
        for _ in 0..3 {
            nav.step_page(Step::Forward);
        }
        let theme = Theme::default();
        let mut buf = Buffer::empty(area);
        BookSpread::new(&nav, &layout, clock(), &theme).render(area, &mut buf);

        let rendered = buffer_text(&buf);
        assert!(rendered.contains("Golem 00"));
        assert!(rendered.contains("Golem 01"));

        let left_num = layout.page_number_row(Side::Left);
        let right_num = layout.page_number_row(Side::Right);
        assert_eq!(buf[(left_num.right() - 1, left_num.y)].symbol(), "7");
        assert_eq!(buf[(right_num.x, right_num.y)].symbol(), "8");
    }

    #[test]
    fn test_recipe_spread_fills_named_placeholders() {
        let area = Rect::new(0, 0, 120, 40);
        let (mut nav, layout) = setup(4, area);
        nav.step_page(Step::Forward);
        let theme = Theme::default();
        let mut buf = Buffer::empty(area);
        BookSpread::new(&nav, &layout, clock(), &theme).render(area, &mut buf);

        let rendered = buffer_text(&buf);
        assert!(rendered.contains("Craft a Golem Spell from Paper"));
        assert!(!rendered.contains("%{"));
    }

    #[test]
    fn test_blank_page_has_no_number() {
        let area = Rect::new(0, 0, 120, 40);
        let (mut nav, layout) = setup(1, area);
        for _ in 0..3 {
            nav.step_page(Step::Forward);
        }
        assert_eq!(nav.current_page(), 6);
        let theme = Theme::default();
        let mut buf = Buffer::empty(area);
        BookSpread::new(&nav, &layout, clock(), &theme).render(area, &mut buf);

        let right_num = layout.page_number_row(Side::Right);
        assert_eq!(buf[(right_num.x, right_num.y)].symbol(), " ");
    }
}
