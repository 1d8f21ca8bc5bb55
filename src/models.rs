//! Data Model
//!
//! Item and material records, serialized with the original tracker's
//! camelCase convention under its localStorage key. The material list is a
//! single category-tagged collection rather than one array per section.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Upper bound for obtained counts; every mutation clamps to [0, MAX_OBTAINED]
pub const MAX_OBTAINED: u32 = 9999;
/// Level bounds for characters and weapons
pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 90;

/// The seven elements a character can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Pyro,
    Hydro,
    Dendro,
    Geo,
    Cryo,
    Anemo,
    Electro,
}

impl Element {
    pub const ALL: [Element; 7] = [
        Element::Pyro,
        Element::Hydro,
        Element::Dendro,
        Element::Geo,
        Element::Cryo,
        Element::Anemo,
        Element::Electro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Pyro => "pyro",
            Element::Hydro => "hydro",
            Element::Dendro => "dendro",
            Element::Geo => "geo",
            Element::Cryo => "cryo",
            Element::Anemo => "anemo",
            Element::Electro => "electro",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Element::ALL.iter().copied().find(|e| e.as_str() == s)
    }

    /// Capitalized label for badges
    pub fn label(&self) -> &'static str {
        match self {
            Element::Pyro => "Pyro",
            Element::Hydro => "Hydro",
            Element::Dendro => "Dendro",
            Element::Geo => "Geo",
            Element::Cryo => "Cryo",
            Element::Anemo => "Anemo",
            Element::Electro => "Electro",
        }
    }
}

/// What kind of item is tracked; the element only exists for characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Character { element: Element },
    Weapon,
}

impl ItemKind {
    pub fn is_character(&self) -> bool {
        matches!(self, ItemKind::Character { .. })
    }

    pub fn element(&self) -> Option<Element> {
        match self {
            ItemKind::Character { element } => Some(*element),
            ItemKind::Weapon => None,
        }
    }

    pub fn type_str(&self) -> &'static str {
        match self {
            ItemKind::Character { .. } => "character",
            ItemKind::Weapon => "weapon",
        }
    }
}

/// Star rarity; only 4 and 5 exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rarity {
    Four,
    Five,
}

impl Default for Rarity {
    fn default() -> Self {
        Rarity::Four
    }
}

impl From<Rarity> for u8 {
    fn from(r: Rarity) -> u8 {
        match r {
            Rarity::Four => 4,
            Rarity::Five => 5,
        }
    }
}

impl TryFrom<u8> for Rarity {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            4 => Ok(Rarity::Four),
            5 => Ok(Rarity::Five),
            other => Err(format!("invalid rarity {other}")),
        }
    }
}

impl Rarity {
    pub fn stars(&self) -> String {
        "★".repeat(u8::from(*self) as usize)
    }
}

/// Which editor section a material belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MaterialCategory {
    Ascension,
    Talent,
    #[default]
    Custom,
}

/// A single resource tracked toward an item's upgrade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRecord {
    pub id: String,
    pub name: String,
    pub required: u32,
    #[serde(default)]
    pub obtained: u32,
    /// Data-URL; a missing image falls back to the generated placeholder
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: MaterialCategory,
}

impl MaterialRecord {
    pub fn new(name: impl Into<String>, required: u32, category: MaterialCategory) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
            required: required.max(1),
            obtained: 0,
            image: None,
            category,
        }
    }

    pub fn set_obtained(&mut self, value: u32) {
        self.obtained = value.min(MAX_OBTAINED);
    }

    /// Saturates at both bounds: -1 at 0 stays 0, +1 at 9999 stays 9999
    pub fn adjust_obtained(&mut self, delta: i32) {
        let next = self.obtained as i64 + delta as i64;
        self.obtained = next.clamp(0, MAX_OBTAINED as i64) as u32;
    }

    pub fn set_required(&mut self, value: u32) {
        self.required = value.max(1);
    }

    pub fn is_complete(&self) -> bool {
        self.obtained >= self.required
    }
}

/// A tracked character or weapon with upgrade progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: ItemKind,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default = "default_current_level")]
    pub current_level: u8,
    #[serde(default = "default_target_level")]
    pub target_level: u8,
    #[serde(default)]
    pub completed: bool,
    /// Dense 1-based rank within the item's completion partition
    #[serde(default)]
    pub priority: u32,
    #[serde(default)]
    pub materials: Vec<MaterialRecord>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub image: Option<String>,
}

fn default_current_level() -> u8 {
    MIN_LEVEL
}

fn default_target_level() -> u8 {
    MAX_LEVEL
}

impl ItemRecord {
    pub fn has_category(&self, category: MaterialCategory) -> bool {
        self.materials.iter().any(|m| m.category == category)
    }

    pub fn material(&self, material_id: &str) -> Option<&MaterialRecord> {
        self.materials.iter().find(|m| m.id == material_id)
    }

    pub fn material_mut(&mut self, material_id: &str) -> Option<&mut MaterialRecord> {
        self.materials.iter_mut().find(|m| m.id == material_id)
    }
}

/// Which level field a level selector edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelField {
    Current,
    Target,
}

/// Form payload for creating or editing an item
#[derive(Debug, Clone, PartialEq)]
pub struct ItemInput {
    pub name: String,
    pub kind: ItemKind,
    pub rarity: Rarity,
    pub notes: String,
    pub current_level: u8,
    pub target_level: u8,
    pub include_ascension: bool,
    pub include_talent: bool,
    /// Data-URL from the file picker; None keeps the existing image on edit
    pub image: Option<String>,
}

impl ItemInput {
    pub fn new(name: impl Into<String>, kind: ItemKind, rarity: Rarity) -> Self {
        Self {
            name: name.into(),
            kind,
            rarity,
            notes: String::new(),
            current_level: MIN_LEVEL,
            target_level: MAX_LEVEL,
            include_ascension: true,
            include_talent: false,
            image: None,
        }
    }
}

static ID_SEQ: AtomicU64 = AtomicU64::new(0);

/// Opaque id: millisecond timestamp plus a process-local sequence so two
/// records created in the same millisecond stay distinct
pub fn new_record_id() -> String {
    format!("{}-{}", now_millis(), ID_SEQ.fetch_add(1, Ordering::Relaxed))
}

#[cfg(target_arch = "wasm32")]
fn now_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
