//! Progress Store
//!
//! The in-memory collection of tracked items: CRUD, completion partitions,
//! priority ranking and material mutations. The reactive `AppState` wrapper
//! (Leptos reactive_stores) lives at the bottom; everything above it is pure
//! and runs in native tests.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::context::AppContext;
use crate::error::TrackerError;
use crate::models::{
    ItemInput, ItemRecord, LevelField, MaterialCategory, MaterialRecord, new_record_id,
    MAX_LEVEL, MIN_LEVEL,
};
use crate::persistence::{self, SaveOutcome};
use crate::templates;

/// Ordered collection of all tracked items
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressStore {
    items: Vec<ItemRecord>,
}

impl ProgressStore {
    pub fn from_items(items: Vec<ItemRecord>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&ItemRecord> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn in_progress_count(&self) -> usize {
        self.items.iter().filter(|i| !i.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|i| i.completed).count()
    }

    /// Create a new in-progress item at the tail of its partition
    pub fn create(&mut self, input: ItemInput) -> Result<&ItemRecord, TrackerError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(TrackerError::Validation("name is required".into()));
        }

        let item = ItemRecord {
            id: new_record_id(),
            name,
            kind: input.kind,
            rarity: input.rarity,
            current_level: clamp_level(input.current_level),
            target_level: clamp_level(input.target_level),
            completed: false,
            priority: self.in_progress_count() as u32 + 1,
            materials: generate_materials(&input),
            notes: input.notes,
            image: input.image,
        };
        self.items.push(item);
        Ok(self.items.last().unwrap())
    }

    /// Merge an edit into an existing item.
    ///
    /// Template-backed material subsets are rebuilt whenever their include
    /// flag is set, resetting obtained counts (matches the original tracker;
    /// recorded as an open-question decision in DESIGN.md). Custom materials
    /// survive the edit.
    pub fn update(&mut self, id: &str, input: ItemInput) -> Result<&ItemRecord, TrackerError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(TrackerError::Validation("name is required".into()));
        }
        let idx = self
            .index_of(id)
            .ok_or_else(|| TrackerError::NotFound(id.to_string()))?;

        let item = &mut self.items[idx];
        item.name = name;
        item.kind = input.kind;
        item.rarity = input.rarity;
        item.notes = input.notes.clone();
        item.current_level = clamp_level(input.current_level);
        item.target_level = clamp_level(input.target_level);
        if let Some(image) = input.image.clone() {
            item.image = Some(image);
        }

        let mut materials = generate_materials(&input);
        materials.extend(
            item.materials
                .drain(..)
                .filter(|m| m.category == MaterialCategory::Custom),
        );
        item.materials = materials;

        Ok(&self.items[idx])
    }

    /// Idempotent delete; re-ranks both completion partitions
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|i| i.id != id);
        self.rerank_partitions();
    }

    /// Flip the completed flag; the item moves to the tail of its new
    /// partition and both partitions are re-ranked
    pub fn set_completed(&mut self, id: &str, completed: bool) -> Result<(), TrackerError> {
        let idx = self
            .index_of(id)
            .ok_or_else(|| TrackerError::NotFound(id.to_string()))?;
        let mut item = self.items.remove(idx);
        item.completed = completed;
        self.items.push(item);
        self.rerank_partitions();
        Ok(())
    }

    /// Drag-reorder: splice the dragged item at the target's position on the
    /// flat list, crossing the completed boundary if the drop does.
    ///
    /// Re-ranks the whole list 1..N, unlike toggle/delete which rank per
    /// partition — the original's two distinct rules, kept distinct.
    pub fn reorder(&mut self, dragged_id: &str, target_id: &str) -> Result<(), TrackerError> {
        if dragged_id == target_id {
            return Ok(());
        }
        let dragged = self
            .index_of(dragged_id)
            .ok_or_else(|| TrackerError::NotFound(dragged_id.to_string()))?;
        let target = self
            .index_of(target_id)
            .ok_or_else(|| TrackerError::NotFound(target_id.to_string()))?;

        let moved = self.items.remove(dragged);
        self.items.insert(target, moved);

        for (i, item) in self.items.iter_mut().enumerate() {
            item.priority = i as u32 + 1;
        }
        Ok(())
    }

    pub fn set_level(&mut self, id: &str, field: LevelField, level: u8) -> Result<(), TrackerError> {
        let item = self.item_mut(id)?;
        match field {
            LevelField::Current => item.current_level = clamp_level(level),
            LevelField::Target => item.target_level = clamp_level(level),
        }
        Ok(())
    }

    // Material mutations. A missing item id is NotFound; a missing material
    // id inside a present item is a silent no-op.

    pub fn set_material_count(&mut self, item_id: &str, material_id: &str, value: u32) -> Result<(), TrackerError> {
        let item = self.item_mut(item_id)?;
        if let Some(mat) = item.material_mut(material_id) {
            mat.set_obtained(value);
        }
        Ok(())
    }

    pub fn adjust_material_count(&mut self, item_id: &str, material_id: &str, delta: i32) -> Result<(), TrackerError> {
        let item = self.item_mut(item_id)?;
        if let Some(mat) = item.material_mut(material_id) {
            mat.adjust_obtained(delta);
        }
        Ok(())
    }

    pub fn rename_material(&mut self, item_id: &str, material_id: &str, name: &str) -> Result<(), TrackerError> {
        let item = self.item_mut(item_id)?;
        if let Some(mat) = item.material_mut(material_id) {
            mat.name = name.to_string();
        }
        Ok(())
    }

    pub fn set_material_required(&mut self, item_id: &str, material_id: &str, required: u32) -> Result<(), TrackerError> {
        let item = self.item_mut(item_id)?;
        if let Some(mat) = item.material_mut(material_id) {
            mat.set_required(required);
        }
        Ok(())
    }

    pub fn set_material_image(&mut self, item_id: &str, material_id: &str, image: String) -> Result<(), TrackerError> {
        let item = self.item_mut(item_id)?;
        if let Some(mat) = item.material_mut(material_id) {
            mat.image = Some(image);
        }
        Ok(())
    }

    pub fn add_custom_material(&mut self, item_id: &str, name: &str) -> Result<(), TrackerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::Validation("material name is required".into()));
        }
        let item = self.item_mut(item_id)?;
        item.materials
            .push(MaterialRecord::new(name, 1, MaterialCategory::Custom));
        Ok(())
    }

    pub fn remove_material(&mut self, item_id: &str, material_id: &str) -> Result<(), TrackerError> {
        let item = self.item_mut(item_id)?;
        item.materials.retain(|m| m.id != material_id);
        Ok(())
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    fn item_mut(&mut self, id: &str) -> Result<&mut ItemRecord, TrackerError> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| TrackerError::NotFound(id.to_string()))
    }

    /// Re-derive dense 1-based ranks inside each completion partition from
    /// the current flat order
    fn rerank_partitions(&mut self) {
        let mut active = 0u32;
        let mut done = 0u32;
        for item in &mut self.items {
            if item.completed {
                done += 1;
                item.priority = done;
            } else {
                active += 1;
                item.priority = active;
            }
        }
    }
}

fn clamp_level(level: u8) -> u8 {
    level.clamp(MIN_LEVEL, MAX_LEVEL)
}

fn generate_materials(input: &ItemInput) -> Vec<MaterialRecord> {
    let mut materials = Vec::new();
    if input.include_ascension {
        materials.extend(templates::ascension_materials(input.kind, input.rarity));
    }
    if input.include_talent && input.kind.is_character() {
        materials.extend(templates::talent_materials());
    }
    materials
}

// ========================
// Reactive app state
// ========================

/// Application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// All tracked items
    pub items: ProgressStore,
}

impl AppState {
    pub fn new(items: ProgressStore) -> Self {
        Self { items }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Save the current snapshot after a mutation, routing any degradation into
/// the warning banner
pub fn persist(store: &AppStore, ctx: &AppContext) {
    let result = store
        .items()
        .with_untracked(|s| persistence::save_snapshot(s.items()));
    match result {
        Ok(SaveOutcome::Saved) => ctx.clear_storage_warning(),
        Ok(SaveOutcome::SavedWithoutLargeImages) => {
            ctx.warn_storage("Storage is nearly full: large images were not saved.");
        }
        Ok(SaveOutcome::SavedWithoutImages) => {
            ctx.warn_storage("Storage is nearly full: images were not saved.");
        }
        Err(e) => {
            ctx.warn_storage(&format!("Progress could not be saved: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Element, ItemKind, Rarity};

    fn character(element: Element) -> ItemKind {
        ItemKind::Character { element }
    }

    fn create(store: &mut ProgressStore, name: &str) -> String {
        store
            .create(ItemInput::new(name, character(Element::Pyro), Rarity::Four))
            .unwrap()
            .id
            .clone()
    }

    fn priorities_of(store: &ProgressStore, completed: bool) -> Vec<u32> {
        store
            .items()
            .iter()
            .filter(|i| i.completed == completed)
            .map(|i| i.priority)
            .collect()
    }

    #[test]
    fn create_assigns_defaults_and_priority() {
        let mut store = ProgressStore::default();
        let input = ItemInput::new("Traveler", character(Element::Anemo), Rarity::Five);
        let item = store.create(input).unwrap();

        assert!(!item.completed);
        assert_eq!(item.priority, 1);
        assert_eq!(item.current_level, 1);
        assert_eq!(item.target_level, 90);
        // 5-star character ascension template
        assert_eq!(item.materials.len(), 5);
    }

    #[test]
    fn create_rejects_blank_name() {
        let mut store = ProgressStore::default();
        let input = ItemInput::new("   ", character(Element::Anemo), Rarity::Five);
        assert!(matches!(store.create(input), Err(TrackerError::Validation(_))));
        assert!(store.items().is_empty());
    }

    #[test]
    fn toggle_moves_item_to_tail_of_new_partition() {
        let mut store = ProgressStore::default();
        let id = create(&mut store, "Traveler");

        store.set_completed(&id, true).unwrap();
        let item = store.get(&id).unwrap();
        assert!(item.completed);
        assert_eq!(item.priority, 1);
        assert_eq!(store.in_progress_count(), 0);

        store.set_completed(&id, false).unwrap();
        let item = store.get(&id).unwrap();
        assert!(!item.completed);
        assert_eq!(item.priority, 1);
    }

    #[test]
    fn partitions_stay_dense_after_delete() {
        let mut store = ProgressStore::default();
        let a = create(&mut store, "A");
        let b = create(&mut store, "B");
        assert_eq!(store.get(&b).unwrap().priority, 2);

        store.remove(&a);
        assert_eq!(store.get(&b).unwrap().priority, 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = ProgressStore::default();
        let a = create(&mut store, "A");
        store.remove(&a);
        store.remove(&a);
        store.remove("never-existed");
        assert!(store.items().is_empty());
    }

    #[test]
    fn partitions_stay_dense_after_toggles() {
        let mut store = ProgressStore::default();
        let ids: Vec<String> = ["A", "B", "C", "D"]
            .iter()
            .map(|n| create(&mut store, n))
            .collect();

        store.set_completed(&ids[1], true).unwrap();
        store.set_completed(&ids[3], true).unwrap();

        assert_eq!(priorities_of(&store, false), vec![1, 2]);
        assert_eq!(priorities_of(&store, true), vec![1, 2]);

        store.set_completed(&ids[1], false).unwrap();
        assert_eq!(priorities_of(&store, false), vec![1, 2, 3]);
        assert_eq!(priorities_of(&store, true), vec![1]);
    }

    #[test]
    fn reorder_splices_and_reranks_globally() {
        let mut store = ProgressStore::default();
        let a = create(&mut store, "A");
        let _b = create(&mut store, "B");
        let c = create(&mut store, "C");

        store.reorder(&c, &a).unwrap();
        let names: Vec<&str> = store.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        let priorities: Vec<u32> = store.items().iter().map(|i| i.priority).collect();
        assert_eq!(priorities, vec![1, 2, 3]);
    }

    #[test]
    fn reorder_can_cross_the_completed_boundary() {
        let mut store = ProgressStore::default();
        let a = create(&mut store, "A");
        let b = create(&mut store, "B");
        store.set_completed(&b, true).unwrap();

        // Dragging the active item onto the completed one is a flat splice
        store.reorder(&a, &b).unwrap();
        let priorities: Vec<u32> = store.items().iter().map(|i| i.priority).collect();
        assert_eq!(priorities, vec![1, 2]);
    }

    #[test]
    fn reorder_missing_ids_and_self_drop() {
        let mut store = ProgressStore::default();
        let a = create(&mut store, "A");
        assert!(matches!(
            store.reorder(&a, "ghost"),
            Err(TrackerError::NotFound(_))
        ));
        assert!(matches!(
            store.reorder("ghost", &a),
            Err(TrackerError::NotFound(_))
        ));
        // Self-drop is a no-op, not an error
        store.reorder(&a, &a).unwrap();
    }

    #[test]
    fn update_regenerates_template_materials() {
        let mut store = ProgressStore::default();
        let id = create(&mut store, "Amber");
        let mat_id = store.get(&id).unwrap().materials[0].id.clone();
        store.set_material_count(&id, &mat_id, 40).unwrap();

        let mut input = ItemInput::new("Amber", character(Element::Pyro), Rarity::Four);
        input.include_ascension = true;
        store.update(&id, input).unwrap();

        // Template subset rebuilt, progress reset (see DESIGN.md)
        let item = store.get(&id).unwrap();
        assert_eq!(item.materials.len(), 4);
        assert!(item.materials.iter().all(|m| m.obtained == 0));
    }

    #[test]
    fn update_preserves_custom_materials() {
        let mut store = ProgressStore::default();
        let id = create(&mut store, "Amber");
        store.add_custom_material(&id, "Mora").unwrap();

        let mut input = ItemInput::new("Amber", character(Element::Pyro), Rarity::Four);
        input.include_ascension = false;
        store.update(&id, input).unwrap();

        let item = store.get(&id).unwrap();
        assert_eq!(item.materials.len(), 1);
        assert_eq!(item.materials[0].name, "Mora");
        assert_eq!(item.materials[0].category, MaterialCategory::Custom);
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let mut store = ProgressStore::default();
        let input = ItemInput::new("Ghost", character(Element::Geo), Rarity::Four);
        assert!(matches!(
            store.update("ghost", input),
            Err(TrackerError::NotFound(_))
        ));
    }

    #[test]
    fn material_count_is_clamped() {
        let mut store = ProgressStore::default();
        let id = create(&mut store, "Amber");
        let mat_id = store.get(&id).unwrap().materials[0].id.clone();

        store.set_material_count(&id, &mat_id, 10000).unwrap();
        assert_eq!(store.get(&id).unwrap().materials[0].obtained, 9999);

        store.adjust_material_count(&id, &mat_id, 5).unwrap();
        assert_eq!(store.get(&id).unwrap().materials[0].obtained, 9999);

        store.set_material_count(&id, &mat_id, 0).unwrap();
        store.adjust_material_count(&id, &mat_id, -1).unwrap();
        assert_eq!(store.get(&id).unwrap().materials[0].obtained, 0);
    }

    #[test]
    fn material_ops_tolerate_missing_material_id() {
        let mut store = ProgressStore::default();
        let id = create(&mut store, "Amber");
        let before = store.get(&id).unwrap().clone();

        store.set_material_count(&id, "ghost", 5).unwrap();
        store.rename_material(&id, "ghost", "x").unwrap();
        store.remove_material(&id, "ghost").unwrap();
        assert_eq!(store.get(&id).unwrap(), &before);

        // But a missing item id is an error
        assert!(matches!(
            store.set_material_count("ghost", "ghost", 5),
            Err(TrackerError::NotFound(_))
        ));
    }

    #[test]
    fn custom_material_lifecycle() {
        let mut store = ProgressStore::default();
        let id = create(&mut store, "Amber");
        store.add_custom_material(&id, "Mora").unwrap();

        let mat_id = store
            .get(&id)
            .unwrap()
            .materials
            .iter()
            .find(|m| m.name == "Mora")
            .unwrap()
            .id
            .clone();
        store.set_material_required(&id, &mat_id, 0).unwrap();
        assert_eq!(store.get(&id).unwrap().material(&mat_id).unwrap().required, 1);

        store.remove_material(&id, &mat_id).unwrap();
        assert!(store.get(&id).unwrap().material(&mat_id).is_none());

        assert!(matches!(
            store.add_custom_material(&id, "  "),
            Err(TrackerError::Validation(_))
        ));
    }

    #[test]
    fn set_level_clamps_to_range() {
        let mut store = ProgressStore::default();
        let id = create(&mut store, "Amber");
        store.set_level(&id, LevelField::Current, 0).unwrap();
        store.set_level(&id, LevelField::Target, 200).unwrap();
        let item = store.get(&id).unwrap();
        assert_eq!(item.current_level, 1);
        assert_eq!(item.target_level, 90);
    }

    #[test]
    fn item_reports_both_template_categories() {
        let mut store = ProgressStore::default();
        let mut input = ItemInput::new("Ayaka", character(Element::Cryo), Rarity::Five);
        input.include_talent = true;
        let item = store.create(input).unwrap();

        // The card's meta tags key off these two predicates
        assert!(item.has_category(MaterialCategory::Ascension));
        assert!(item.has_category(MaterialCategory::Talent));

        let input = ItemInput::new("Bennett", character(Element::Pyro), Rarity::Four);
        let item = store.create(input).unwrap();
        assert!(item.has_category(MaterialCategory::Ascension));
        assert!(!item.has_category(MaterialCategory::Talent));
    }

    #[test]
    fn weapon_input_never_gets_talent_materials() {
        let mut store = ProgressStore::default();
        let mut input = ItemInput::new("The Catch", ItemKind::Weapon, Rarity::Four);
        input.include_talent = true;
        let item = store.create(input).unwrap();
        assert!(!item.has_category(MaterialCategory::Talent));
        assert_eq!(item.materials.len(), 3);
    }
}
