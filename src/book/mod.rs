pub mod controls;
pub mod navigation;
pub mod pagination;
pub mod recipe;
pub mod scroll;
