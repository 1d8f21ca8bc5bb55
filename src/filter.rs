//! Filter Engine
//!
//! Pure mapping from (items, filter key) to the visible subset in display
//! order. Completed items only ever show under the `completed` key; every
//! other view is an active-work view.

use crate::models::{Element, ItemKind, ItemRecord, MaterialCategory, Rarity};

/// Recognized filter-bar keys; unknown key strings fall back to `All`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKey {
    #[default]
    All,
    InProgress,
    Completed,
    CharacterFour,
    CharacterFive,
    WeaponFour,
    WeaponFive,
    Element(Element),
    AscensionMaterials,
    TalentMaterials,
}

impl FilterKey {
    /// Fail-open parse: anything unrecognized behaves as `all`
    pub fn from_key(key: &str) -> Self {
        match key {
            "in-progress" => FilterKey::InProgress,
            "completed" => FilterKey::Completed,
            "character-4" => FilterKey::CharacterFour,
            "character-5" => FilterKey::CharacterFive,
            "weapon-4" => FilterKey::WeaponFour,
            "weapon-5" => FilterKey::WeaponFive,
            "ascension-materials" => FilterKey::AscensionMaterials,
            "talent-materials" => FilterKey::TalentMaterials,
            other => match Element::from_str(other) {
                Some(element) => FilterKey::Element(element),
                None => FilterKey::All,
            },
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            FilterKey::All => "all",
            FilterKey::InProgress => "in-progress",
            FilterKey::Completed => "completed",
            FilterKey::CharacterFour => "character-4",
            FilterKey::CharacterFive => "character-5",
            FilterKey::WeaponFour => "weapon-4",
            FilterKey::WeaponFive => "weapon-5",
            FilterKey::Element(element) => element.as_str(),
            FilterKey::AscensionMaterials => "ascension-materials",
            FilterKey::TalentMaterials => "talent-materials",
        }
    }

    fn matches(&self, item: &ItemRecord) -> bool {
        match self {
            FilterKey::All | FilterKey::InProgress => !item.completed,
            FilterKey::Completed => item.completed,
            FilterKey::CharacterFour => {
                !item.completed && item.kind.is_character() && item.rarity == Rarity::Four
            }
            FilterKey::CharacterFive => {
                !item.completed && item.kind.is_character() && item.rarity == Rarity::Five
            }
            FilterKey::WeaponFour => {
                !item.completed && item.kind == ItemKind::Weapon && item.rarity == Rarity::Four
            }
            FilterKey::WeaponFive => {
                !item.completed && item.kind == ItemKind::Weapon && item.rarity == Rarity::Five
            }
            FilterKey::Element(element) => {
                !item.completed && item.kind.element() == Some(*element)
            }
            FilterKey::AscensionMaterials => {
                !item.completed && item.has_category(MaterialCategory::Ascension)
            }
            FilterKey::TalentMaterials => {
                !item.completed && item.has_category(MaterialCategory::Talent)
            }
        }
    }
}

/// Visible subset for a filter key, sorted by ascending priority
pub fn filter(items: &[ItemRecord], key: FilterKey) -> Vec<ItemRecord> {
    let mut subset: Vec<ItemRecord> = items.iter().filter(|i| key.matches(i)).cloned().collect();
    subset.sort_by_key(|i| i.priority);
    subset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemInput;
    use crate::store::ProgressStore;

    fn sample_store() -> ProgressStore {
        let mut store = ProgressStore::default();
        let anemo = ItemKind::Character { element: Element::Anemo };
        let pyro = ItemKind::Character { element: Element::Pyro };
        store.create(ItemInput::new("Traveler", anemo, Rarity::Five)).unwrap();
        store.create(ItemInput::new("Amber", pyro, Rarity::Four)).unwrap();
        store.create(ItemInput::new("The Catch", ItemKind::Weapon, Rarity::Four)).unwrap();
        let done_id = store
            .create(ItemInput::new("Mistsplitter", ItemKind::Weapon, Rarity::Five))
            .unwrap()
            .id
            .clone();
        store.set_completed(&done_id, true).unwrap();
        store
    }

    #[test]
    fn completed_and_in_progress_partition_the_set() {
        let store = sample_store();
        let done = filter(store.items(), FilterKey::Completed);
        let active = filter(store.items(), FilterKey::InProgress);

        assert_eq!(done.len() + active.len(), store.items().len());
        for item in &done {
            assert!(!active.iter().any(|a| a.id == item.id));
        }
    }

    #[test]
    fn type_rarity_keys_exclude_completed() {
        let store = sample_store();
        // Mistsplitter is a completed 5-star weapon; it must not show here
        let weapons = filter(store.items(), FilterKey::WeaponFive);
        assert!(weapons.is_empty());

        let four_star_weapons = filter(store.items(), FilterKey::WeaponFour);
        assert_eq!(four_star_weapons.len(), 1);
        assert_eq!(four_star_weapons[0].name, "The Catch");
    }

    #[test]
    fn element_key_matches_characters_only() {
        let store = sample_store();
        let anemo = filter(store.items(), FilterKey::Element(Element::Anemo));
        assert_eq!(anemo.len(), 1);
        assert_eq!(anemo[0].name, "Traveler");
        assert!(filter(store.items(), FilterKey::Element(Element::Electro)).is_empty());
    }

    #[test]
    fn unknown_key_fails_open_to_all() {
        assert_eq!(FilterKey::from_key("nonsense"), FilterKey::All);
        assert_eq!(FilterKey::from_key(""), FilterKey::All);
        assert_eq!(FilterKey::from_key("anemo"), FilterKey::Element(Element::Anemo));
    }

    #[test]
    fn every_key_string_parses_back() {
        let keys = [
            FilterKey::All,
            FilterKey::InProgress,
            FilterKey::Completed,
            FilterKey::CharacterFour,
            FilterKey::CharacterFive,
            FilterKey::WeaponFour,
            FilterKey::WeaponFive,
            FilterKey::Element(Element::Geo),
            FilterKey::AscensionMaterials,
            FilterKey::TalentMaterials,
        ];
        for key in keys {
            assert_eq!(FilterKey::from_key(key.as_key()), key);
        }
    }

    #[test]
    fn output_is_ordered_by_priority() {
        let store = sample_store();
        let active = filter(store.items(), FilterKey::All);
        let priorities: Vec<u32> = active.iter().map(|i| i.priority).collect();
        assert_eq!(priorities, vec![1, 2, 3]);
    }

    #[test]
    fn material_category_keys() {
        let mut store = sample_store();
        let with_talent = {
            let anemo = ItemKind::Character { element: Element::Cryo };
            let mut input = ItemInput::new("Ayaka", anemo, Rarity::Five);
            input.include_talent = true;
            store.create(input).unwrap().id.clone()
        };

        let talent = filter(store.items(), FilterKey::TalentMaterials);
        assert_eq!(talent.len(), 1);
        assert_eq!(talent[0].id, with_talent);

        // Every default create includes ascension materials
        let ascension = filter(store.items(), FilterKey::AscensionMaterials);
        assert_eq!(ascension.len(), 4);
    }
}
