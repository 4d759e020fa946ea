//! Plant storage - typed persistence for plants.

use crate::define_table_storage;
use anyhow::Result;
use verdant_models::Plant;
use verdant_traits::PlantStore;

define_table_storage! {
    /// Plant records, keyed by plant id.
    pub struct PlantStorage { table: "plants" }
}

impl PlantStorage {
    pub fn put(&self, plant: &Plant) -> Result<()> {
        let bytes = serde_json::to_vec(plant)?;
        self.put_raw(&plant.id, &bytes)
    }

    pub fn get(&self, id: &str) -> Result<Option<Plant>> {
        match self.get_raw(id)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Plant>> {
        let mut plants = Vec::new();
        for (_, bytes) in self.list_raw()? {
            let plant: Plant = serde_json::from_slice(&bytes)?;
            if plant.owner_id == owner_id {
                plants.push(plant);
            }
        }
        Ok(plants)
    }

    pub fn list_in_location(&self, location_id: &str) -> Result<Vec<Plant>> {
        let mut plants = Vec::new();
        for (_, bytes) in self.list_raw()? {
            let plant: Plant = serde_json::from_slice(&bytes)?;
            if plant.location_id.as_deref() == Some(location_id) {
                plants.push(plant);
            }
        }
        Ok(plants)
    }
}

impl PlantStore for PlantStorage {
    fn get_plant(&self, id: &str) -> Result<Option<Plant>> {
        self.get(id)
    }

    fn list_plants_by_owner(&self, owner_id: &str) -> Result<Vec<Plant>> {
        self.list_by_owner(owner_id)
    }

    fn list_plants_in_location(&self, location_id: &str) -> Result<Vec<Plant>> {
        self.list_in_location(location_id)
    }

    fn put_plant(&self, plant: &Plant) -> Result<()> {
        self.put(plant)
    }

    fn delete_plant(&self, id: &str) -> Result<bool> {
        self.delete_raw(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redb::Database;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn test_storage() -> (tempfile::TempDir, PlantStorage) {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db = Arc::new(Database::create(db_path).unwrap());
        let storage = PlantStorage::new(db).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_put_and_get() {
        let (_dir, storage) = test_storage();

        let plant = Plant::new("user-1".into(), "Monstera".into(), None, None);
        storage.put(&plant).unwrap();

        let loaded = storage.get(&plant.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Monstera");
        assert_eq!(loaded.owner_id, "user-1");
    }

    #[test]
    fn test_list_by_owner_filters() {
        let (_dir, storage) = test_storage();

        storage
            .put(&Plant::new("user-1".into(), "Fern".into(), None, None))
            .unwrap();
        storage
            .put(&Plant::new("user-1".into(), "Ivy".into(), None, None))
            .unwrap();
        storage
            .put(&Plant::new("user-2".into(), "Cactus".into(), None, None))
            .unwrap();

        assert_eq!(storage.list_by_owner("user-1").unwrap().len(), 2);
        assert_eq!(storage.list_by_owner("user-2").unwrap().len(), 1);
        assert!(storage.list_by_owner("user-3").unwrap().is_empty());
    }

    #[test]
    fn test_list_in_location() {
        let (_dir, storage) = test_storage();

        storage
            .put(&Plant::new(
                "user-1".into(),
                "Fern".into(),
                None,
                Some("loc-1".into()),
            ))
            .unwrap();
        storage
            .put(&Plant::new("user-1".into(), "Ivy".into(), None, None))
            .unwrap();

        let in_location = storage.list_in_location("loc-1").unwrap();
        assert_eq!(in_location.len(), 1);
        assert_eq!(in_location[0].name, "Fern");
    }

    #[test]
    fn test_delete() {
        let (_dir, storage) = test_storage();

        let plant = Plant::new("user-1".into(), "Fern".into(), None, None);
        storage.put(&plant).unwrap();

        assert!(storage.delete_raw(&plant.id).unwrap());
        assert!(!storage.delete_raw(&plant.id).unwrap());
        assert!(storage.get(&plant.id).unwrap().is_none());
    }
}
