use std::path::Path;
use std::sync::Arc;

use ratatui::layout::Rect;

use crate::book::controls::{Action, ControlKind, ControlList};
use crate::book::navigation::{Navigator, Step};
use crate::book::pagination::Pagination;
use crate::book::scroll::{ScrollTrack, ScrollWindow, WINDOW_SIZE};
use crate::catalog::source::{self, LoadedCatalog};
use crate::catalog::{Catalog, CatalogCell};
use crate::config::Config;
use crate::ui::components::entry_page::IconClock;
use crate::ui::layout::BookLayout;
use crate::ui::theme::Theme;

pub struct App {
    pub config: Config,
    pub theme: &'static Theme,
    pub navigator: Navigator,
    pub layout: BookLayout,
    pub controls: ControlList,
    pub hovered: Option<ControlKind>,
    pub elapsed_ticks: u64,
    /// One-line message for the footer, e.g. skipped catalog entries.
    pub status: Option<String>,
    pub should_quit: bool,
    catalog_cell: CatalogCell,
}

impl App {
    pub fn new(config: Config, theme: &'static Theme) -> Self {
        let mut catalog_cell = CatalogCell::new();
        let mut status = None;
        let catalog = catalog_cell.get_or_build(|| {
            let (catalog, message) = load_catalog(&config);
            status = message;
            catalog
        });
        let mut app = Self::with_catalog(config, theme, catalog_cell, catalog);
        app.status = status;
        app
    }

    fn with_catalog(
        config: Config,
        theme: &'static Theme,
        catalog_cell: CatalogCell,
        catalog: Arc<Catalog>,
    ) -> Self {
        let layout = BookLayout::new(Rect::default());
        let navigator = build_navigator(catalog, &config);
        let mut app = Self {
            config,
            theme,
            navigator,
            layout,
            controls: ControlList::new(),
            hovered: None,
            elapsed_ticks: 0,
            status: None,
            should_quit: false,
            catalog_cell,
        };
        app.sync_layout();
        app
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        self.navigator.catalog()
    }

    pub fn clock(&self) -> IconClock {
        IconClock {
            elapsed_ticks: self.elapsed_ticks,
            ticks_per_icon: self.config.ticks_per_icon,
        }
    }

    pub fn tick(&mut self) {
        self.elapsed_ticks = self.elapsed_ticks.wrapping_add(1);
    }

    pub fn resize(&mut self, area: Rect) {
        self.layout = BookLayout::new(area);
        self.sync_layout();
    }

    /// Re-read the catalog and rebuild the navigator on top of it. The
    /// current page survives when the new catalog still has it.
    pub fn reload(&mut self) {
        let page = self.navigator.current_page();
        let (catalog, message) = load_catalog(&self.config);
        let catalog = self.catalog_cell.replace(catalog);
        tracing::info!(entries = catalog.len(), "catalog reloaded");

        self.navigator = build_navigator(catalog, &self.config);
        self.navigator.set_page(page);
        self.status = Some(message.unwrap_or_else(|| {
            format!("Reloaded {} golems", self.navigator.catalog().len())
        }));
        self.sync_layout();
    }

    pub fn step(&mut self, step: Step) {
        self.navigator.step_page(step);
        self.sync_layout();
    }

    pub fn go_to_start(&mut self) {
        self.navigator.go_to_start();
        self.sync_layout();
    }

    pub fn open_index_row(&mut self, slot: usize) {
        self.navigator.activate_index_row(slot);
        self.sync_layout();
    }

    pub fn scroll_rows(&mut self, rows: isize) {
        self.navigator.scroll_rows(rows);
        self.sync_layout();
    }

    /// Left button down at a screen cell.
    pub fn press(&mut self, column: u16, row: u16) {
        let Some(kind) = self.controls.hit_test(column, row) else {
            return;
        };
        match kind.on_activate() {
            Some(Action::BeginDrag) => {
                self.navigator.begin_drag(row as i32);
            }
            Some(Action::Step(step)) => {
                self.navigator.step_page(step);
            }
            Some(Action::OpenIndexRow(slot)) => {
                self.navigator.activate_index_row(slot);
            }
            Some(Action::Close) => {
                self.should_quit = true;
                return;
            }
            None => return,
        }
        self.sync_layout();
    }

    pub fn drag(&mut self, row: u16) {
        if self.navigator.drag_to(row as i32) {
            self.sync_layout();
        }
    }

    pub fn release(&mut self) {
        self.navigator.end_drag();
    }

    pub fn wheel(&mut self, notches: i32) {
        if self.navigator.wheel(notches) {
            self.sync_layout();
        }
    }

    pub fn hover(&mut self, column: u16, row: u16) {
        self.hovered = self.controls.hit_test(column, row);
    }

    /// Feed the layout's track to the scroll state and rebuild the control
    /// list for the current spread.
    fn sync_layout(&mut self) {
        let track = self.layout.scroll_track(&self.navigator);
        self.navigator.set_track(track);
        self.controls = self.layout.controls(&self.navigator);
        let still_live = self
            .hovered
            .and_then(|kind| self.controls.get(kind))
            .is_some_and(|c| c.enabled);
        if !still_live {
            self.hovered = None;
        }
    }
}

/// The track is a placeholder until the next `sync_layout`.
fn build_navigator(catalog: Arc<Catalog>, config: &Config) -> Navigator {
    let pagination = Pagination::new(Arc::clone(&catalog));
    let scroll = ScrollWindow::new(catalog, WINDOW_SIZE, ScrollTrack::default())
        .with_wheel_step(config.wheel_step);
    Navigator::new(pagination, scroll)
}

/// Build the catalog from the configured file, falling back to the bundled
/// one. The message, if any, is meant for the footer.
fn load_catalog(config: &Config) -> (Catalog, Option<String>) {
    if let Some(path) = config.catalog_path.as_deref() {
        match source::load_file(Path::new(path)) {
            Ok(loaded) => {
                let message = skipped_message(&loaded);
                return (loaded.catalog, message);
            }
            Err(err) => {
                tracing::warn!("falling back to bundled catalog: {err}");
                let (catalog, _) = load_bundled_catalog();
                return (catalog, Some(format!("{err}; using bundled catalog")));
            }
        }
    }
    load_bundled_catalog()
}

fn load_bundled_catalog() -> (Catalog, Option<String>) {
    match source::load_bundled() {
        Ok(loaded) => {
            let message = skipped_message(&loaded);
            (loaded.catalog, message)
        }
        Err(err) => {
            tracing::error!("bundled catalog unavailable: {err}");
            (Catalog::empty(), Some(err.to_string()))
        }
    }
}

fn skipped_message(loaded: &LoadedCatalog) -> Option<String> {
    match loaded.diagnostics.len() {
        0 => None,
        1 => Some(loaded.diagnostics[0].to_string()),
        n => Some(format!("{n} catalog entries skipped (see log)")),
    }
}
