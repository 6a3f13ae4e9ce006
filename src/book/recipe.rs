/// A 2x2 crafting recipe shown on an intro page. Names are text keys.
#[derive(Clone, Copy, Debug)]
pub struct Recipe {
    pub ingredients: &'static [&'static str],
    pub output: &'static str,
}

pub const SPELL_RECIPE: Recipe = Recipe {
    ingredients: &[
        "item.minecraft.paper",
        "item.minecraft.feather",
        "item.minecraft.redstone",
        "item.minecraft.ink_sac",
    ],
    output: "item.golems.golem_paper",
};

pub const HEAD_RECIPE: Recipe = Recipe {
    ingredients: &["block.minecraft.carved_pumpkin", "item.golems.golem_paper"],
    output: "block.golems.golem_head",
};

pub const GRID_SLOTS: usize = 4;

/// Grid cell of a crafting slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub col: u16,
    pub row: u16,
}

impl Recipe {
    /// Ingredients with their slots, filling the grid row by row. Anything
    /// past the fourth ingredient has no slot and is dropped.
    pub fn slots(&self) -> impl Iterator<Item = (Slot, &'static str)> {
        self.ingredients
            .iter()
            .take(GRID_SLOTS)
            .enumerate()
            .map(|(i, &item)| {
                let slot = Slot {
                    col: (i % 2) as u16,
                    row: (i / 2) as u16,
                };
                (slot, item)
            })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagramBlock {
    Head,
    Body,
}

/// Building layout of a golem on a 3x3 grid: head on top, three body
/// blocks across, one body block below the middle.
pub const GOLEM_DIAGRAM: [(Slot, DiagramBlock); 5] = [
    (Slot { col: 1, row: 0 }, DiagramBlock::Head),
    (Slot { col: 0, row: 1 }, DiagramBlock::Body),
    (Slot { col: 1, row: 1 }, DiagramBlock::Body),
    (Slot { col: 2, row: 1 }, DiagramBlock::Body),
    (Slot { col: 1, row: 2 }, DiagramBlock::Body),
];
