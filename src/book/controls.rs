use ratatui::layout::{Position, Rect};

use crate::book::navigation::Step;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    PrevPage,
    NextPage,
    Done,
    /// Row of the contents index, counted from the top of the window.
    IndexRow(usize),
    ScrollTrack,
    /// Rotating icon on an entry page. Hover only.
    EntryIcon(Side),
}

/// What activating a control asks the session to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Step(Step),
    OpenIndexRow(usize),
    BeginDrag,
    Close,
}

impl ControlKind {
    pub fn on_activate(self) -> Option<Action> {
        match self {
            ControlKind::PrevPage => Some(Action::Step(Step::Back)),
            ControlKind::NextPage => Some(Action::Step(Step::Forward)),
            ControlKind::Done => Some(Action::Close),
            ControlKind::IndexRow(slot) => Some(Action::OpenIndexRow(slot)),
            ControlKind::ScrollTrack => Some(Action::BeginDrag),
            ControlKind::EntryIcon(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Control {
    pub kind: ControlKind,
    pub bounds: Rect,
    pub enabled: bool,
}

/// Flat list of the controls on screen. Hit testing walks it in order and
/// returns the first enabled control under the pointer.
#[derive(Clone, Debug, Default)]
pub struct ControlList {
    controls: Vec<Control>,
}

impl ControlList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ControlKind, bounds: Rect, enabled: bool) {
        self.controls.push(Control {
            kind,
            bounds,
            enabled,
        });
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<ControlKind> {
        let pos = Position::new(column, row);
        self.controls
            .iter()
            .find(|c| c.enabled && c.bounds.contains(pos))
            .map(|c| c.kind)
    }

    pub fn get(&self, kind: ControlKind) -> Option<&Control> {
        self.controls.iter().find(|c| c.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Control> {
        self.controls.iter()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_skips_disabled() {
        let mut list = ControlList::new();
        list.push(ControlKind::PrevPage, Rect::new(0, 0, 4, 1), false);
        list.push(ControlKind::NextPage, Rect::new(10, 0, 4, 1), true);
        assert_eq!(list.hit_test(1, 0), None);
        assert_eq!(list.hit_test(12, 0), Some(ControlKind::NextPage));
        assert_eq!(list.hit_test(14, 0), None);
    }

    #[test]
    fn test_hit_test_first_match_wins() {
        let mut list = ControlList::new();
        list.push(ControlKind::IndexRow(0), Rect::new(0, 0, 10, 2), true);
        list.push(ControlKind::ScrollTrack, Rect::new(0, 0, 20, 20), true);
        assert_eq!(list.hit_test(3, 1), Some(ControlKind::IndexRow(0)));
        assert_eq!(list.hit_test(15, 1), Some(ControlKind::ScrollTrack));
    }

    #[test]
    fn test_activation_table() {
        assert_eq!(
            ControlKind::NextPage.on_activate(),
            Some(Action::Step(Step::Forward))
        );
        assert_eq!(
            ControlKind::IndexRow(3).on_activate(),
            Some(Action::OpenIndexRow(3))
        );
        assert_eq!(ControlKind::EntryIcon(Side::Left).on_activate(), None);
    }
}
