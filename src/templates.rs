//! Default Material Templates
//!
//! Static per-kind/per-rarity tables. The generators allocate fresh records
//! with fresh ids, so no two items ever share a material.

use crate::models::{ItemKind, MaterialCategory, MaterialRecord, Rarity};

const CHARACTER_ASCENSION_4: &[(&str, u32)] = &[
    ("Character EXP Material", 171),
    ("Elemental Gem", 46),
    ("Local Specialty", 168),
    ("Common Enemy Drop", 18),
];

const CHARACTER_ASCENSION_5: &[(&str, u32)] = &[
    ("Character EXP Material", 171),
    ("Elemental Gem", 46),
    ("Local Specialty", 168),
    ("Common Enemy Drop", 18),
    ("Boss Material", 46),
];

const WEAPON_ASCENSION_4: &[(&str, u32)] = &[
    ("Weapon EXP Material", 605),
    ("Weapon Ascension Material", 15),
    ("Common Enemy Drop", 23),
];

const WEAPON_ASCENSION_5: &[(&str, u32)] = &[
    ("Weapon EXP Material", 605),
    ("Weapon Ascension Material", 15),
    ("Elite Enemy Drop", 23),
    ("Weekly Boss Material", 6),
];

const TALENT: &[(&str, u32)] = &[
    ("Talent Book", 114),
    ("Common Enemy Drop", 18),
    ("Weekly Boss Material", 18),
    ("Crown of Insight", 3),
];

fn build(entries: &[(&str, u32)], category: MaterialCategory) -> Vec<MaterialRecord> {
    entries
        .iter()
        .map(|(name, required)| MaterialRecord::new(*name, *required, category))
        .collect()
}

/// Ascension materials for a freshly created or re-templated item
pub fn ascension_materials(kind: ItemKind, rarity: Rarity) -> Vec<MaterialRecord> {
    let entries = match (kind.is_character(), rarity) {
        (true, Rarity::Four) => CHARACTER_ASCENSION_4,
        (true, Rarity::Five) => CHARACTER_ASCENSION_5,
        (false, Rarity::Four) => WEAPON_ASCENSION_4,
        (false, Rarity::Five) => WEAPON_ASCENSION_5,
    };
    build(entries, MaterialCategory::Ascension)
}

/// Talent materials; only characters have talents
pub fn talent_materials() -> Vec<MaterialRecord> {
    build(TALENT, MaterialCategory::Talent)
}
