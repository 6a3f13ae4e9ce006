use std::fmt::Write as _;

use serde::Deserialize;

/// Stable identity of an entry inside the catalog that issued it.
///
/// Two entries with the same name still have distinct ids. Each id carries
/// the token of the catalog that built it, and lookups in any other catalog
/// come back empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId {
    pub(crate) catalog: u64,
    pub(crate) index: usize,
}

impl EntryId {
    pub(crate) fn new(catalog: u64, index: usize) -> Self {
        Self { catalog, index }
    }

    pub fn index(self) -> usize {
        self.index
    }
}

#[derive(Clone, Debug)]
pub struct Entry {
    id: EntryId,
    pub name: String,
    pub rank: f32,
    pub icons: Vec<String>,
    pub description: String,
    pub supplemental_image: Option<String>,
}

impl Entry {
    pub(crate) fn new(id: EntryId, raw: RawEntry, name: String, rank: f32) -> Self {
        let description = match raw.description {
            Some(ref text) if !text.trim().is_empty() => text.clone(),
            _ => compose_description(&raw),
        };
        Self {
            id,
            name,
            rank,
            icons: raw.icons,
            description,
            supplemental_image: raw.supplemental_image,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Icon shown after `elapsed_ticks`, cycling every `ticks_per_icon` ticks.
    /// `None` when the entry has no icons at all.
    pub fn icon_at(&self, elapsed_ticks: u64, ticks_per_icon: u64) -> Option<&str> {
        if self.icons.is_empty() {
            return None;
        }
        let step = elapsed_ticks / ticks_per_icon.max(1);
        let idx = (step % self.icons.len() as u64) as usize;
        Some(self.icons[idx].as_str())
    }
}

/// One record as it comes out of a catalog source, before validation.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rank: Option<f32>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub icons: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "image")]
    pub supplemental_image: Option<String>,
    #[serde(default)]
    pub health: Option<f32>,
    #[serde(default)]
    pub attack: Option<f32>,
    #[serde(default)]
    pub fireproof: bool,
    #[serde(default)]
    pub multi_textured: bool,
    #[serde(default)]
    pub specials: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

impl RawEntry {
    pub fn named(name: &str, rank: f32) -> Self {
        Self {
            name: Some(name.to_string()),
            rank: Some(rank),
            enabled: true,
            ..Self::default()
        }
    }

    /// Explicit rank, falling back to the attack stat.
    pub fn effective_rank(&self) -> Option<f32> {
        self.rank.or(self.attack)
    }
}

/// Build the attribute listing shown on an entry page when the source did
/// not supply a description of its own.
fn compose_description(raw: &RawEntry) -> String {
    let mut out = String::new();
    if let Some(health) = raw.health {
        let _ = writeln!(out, "Health: {health:.1}");
    }
    if let Some(attack) = raw.attack {
        let _ = writeln!(out, "Attack: {attack:.1}");
    }
    if raw.multi_textured {
        out.push_str("Multi-Textured\n");
    }
    if raw.fireproof {
        out.push_str("Fireproof\n");
    }
    for special in &raw.specials {
        let _ = writeln!(out, "{special}");
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_with_icons(icons: &[&str]) -> Entry {
        let mut raw = RawEntry::named("Clay Golem", 2.0);
        raw.icons = icons.iter().map(|s| s.to_string()).collect();
        Entry::new(EntryId::new(0, 0), raw, "Clay Golem".to_string(), 2.0)
    }

    #[test]
    fn test_icon_rotation_cycles_every_period() {
        let entry = entry_with_icons(&["white_wool", "red_wool", "blue_wool"]);
        assert_eq!(entry.icon_at(0, 30), Some("white_wool"));
        assert_eq!(entry.icon_at(29, 30), Some("white_wool"));
        assert_eq!(entry.icon_at(30, 30), Some("red_wool"));
        assert_eq!(entry.icon_at(89, 30), Some("blue_wool"));
        assert_eq!(entry.icon_at(90, 30), Some("white_wool"));
    }

    #[test]
    fn test_icon_rotation_without_icons() {
        let entry = entry_with_icons(&[]);
        assert_eq!(entry.icon_at(1000, 30), None);
    }

    #[test]
    fn test_icon_rotation_zero_period_does_not_divide_by_zero() {
        let entry = entry_with_icons(&["a", "b"]);
        assert_eq!(entry.icon_at(3, 0), Some("b"));
    }

    #[test]
    fn test_description_composed_from_attributes() {
        let raw = RawEntry {
            name: Some("Magma Golem".to_string()),
            health: Some(46.0),
            attack: Some(4.5),
            fireproof: true,
            multi_textured: false,
            specials: vec!["Lights creatures on fire".to_string()],
            ..RawEntry::default()
        };
        let entry = Entry::new(EntryId::new(0, 3), raw, "Magma Golem".to_string(), 4.5);
        assert_eq!(
            entry.description,
            "Health: 46.0\nAttack: 4.5\nFireproof\nLights creatures on fire"
        );
    }

    #[test]
    fn test_explicit_description_wins() {
        let mut raw = RawEntry::named("Hay Golem", 1.0);
        raw.description = Some("Soft and scratchy.".to_string());
        raw.health = Some(12.0);
        let entry = Entry::new(EntryId::new(0, 1), raw, "Hay Golem".to_string(), 1.0);
        assert_eq!(entry.description, "Soft and scratchy.");
    }

    #[test]
    fn test_rank_falls_back_to_attack() {
        let raw = RawEntry {
            attack: Some(7.0),
            ..RawEntry::default()
        };
        assert_eq!(raw.effective_rank(), Some(7.0));
        let raw = RawEntry {
            rank: Some(1.0),
            attack: Some(7.0),
            ..RawEntry::default()
        };
        assert_eq!(raw.effective_rank(), Some(1.0));
    }
}
