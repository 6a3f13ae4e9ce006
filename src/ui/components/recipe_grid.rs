use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};
use rust_i18n::t;

use crate::book::recipe::{DiagramBlock, GOLEM_DIAGRAM, Recipe, Slot};
use crate::ui::theme::Theme;

const CELL_WIDTH: u16 = 14;
const CELL_HEIGHT: u16 = 3;
const ARROW: &str = "=>";

const HEAD_KEY: &str = "block.golems.golem_head";
const BODY_KEY: &str = "block.minecraft.iron_block";

/// Cell of `slot` in a grid anchored at `origin`, clipped to it.
fn slot_rect(origin: Rect, slot: Slot) -> Rect {
    Rect::new(
        origin.x + slot.col * CELL_WIDTH,
        origin.y + slot.row * CELL_HEIGHT,
        CELL_WIDTH,
        CELL_HEIGHT,
    )
    .intersection(origin)
}

fn draw_cell(buf: &mut Buffer, area: Rect, label: &str, border: Style, label_style: Style) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let block = Block::bordered().border_style(border);
    let inner = block.inner(area);
    block.render(area, buf);
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let shown: String = label.chars().take(inner.width as usize).collect();
    let x = inner.x + (inner.width.saturating_sub(shown.chars().count() as u16)) / 2;
    buf.set_string(x, inner.y, &shown, label_style);
}

/// 2x2 crafting grid, an arrow, then the output cell.
pub struct RecipeGrid<'a> {
    recipe: Recipe,
    theme: &'a Theme,
}

impl<'a> RecipeGrid<'a> {
    pub fn new(recipe: Recipe, theme: &'a Theme) -> Self {
        Self { recipe, theme }
    }

    pub fn size() -> (u16, u16) {
        (CELL_WIDTH * 3 + ARROW.len() as u16 + 2, CELL_HEIGHT * 2)
    }
}

impl Widget for RecipeGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let border = Style::default().fg(colors.page_border()).bg(colors.page_bg());
        let label = Style::default().fg(colors.ink()).bg(colors.page_bg());

        let grid = Rect::new(area.x, area.y, CELL_WIDTH * 2, CELL_HEIGHT * 2).intersection(area);
        for (slot, key) in self.recipe.slots() {
            draw_cell(buf, slot_rect(grid, slot), &t!(key), border, label);
        }

        let arrow_x = grid.right() + 1;
        let mid_y = area.y + CELL_HEIGHT.min(area.height.saturating_sub(1));
        if arrow_x < area.right() {
            buf.set_stringn(
                arrow_x,
                mid_y,
                ARROW,
                (area.right() - arrow_x) as usize,
                label,
            );
        }

        let out_x = arrow_x + ARROW.len() as u16 + 1;
        let out = Rect::new(out_x, mid_y.saturating_sub(1), CELL_WIDTH, CELL_HEIGHT)
            .intersection(area);
        draw_cell(
            buf,
            out,
            &t!(self.recipe.output),
            Style::default().fg(colors.accent()).bg(colors.page_bg()),
            label.add_modifier(Modifier::BOLD),
        );
    }
}

/// Head above three body blocks with one more below the middle.
pub struct GolemDiagram<'a> {
    theme: &'a Theme,
}

impl<'a> GolemDiagram<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    pub fn size() -> (u16, u16) {
        (CELL_WIDTH * 3, CELL_HEIGHT * 3)
    }
}

impl Widget for GolemDiagram<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let grid = Rect::new(area.x, area.y, CELL_WIDTH * 3, CELL_HEIGHT * 3).intersection(area);
        for (slot, block) in GOLEM_DIAGRAM {
            let (key, fg) = match block {
                DiagramBlock::Head => (HEAD_KEY, colors.accent()),
                DiagramBlock::Body => (BODY_KEY, colors.icon()),
            };
            let style = Style::default().fg(fg).bg(colors.page_bg());
            draw_cell(buf, slot_rect(grid, slot), &t!(key), style, style);
        }
    }
}
