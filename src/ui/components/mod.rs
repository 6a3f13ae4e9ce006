pub mod book_spread;
pub mod contents_index;
pub mod entry_page;
pub mod nav_bar;
pub mod recipe_grid;
pub mod status_bar;
