//! Species storage - typed persistence for species and their care
//! intervals.

use crate::define_table_storage;
use anyhow::Result;
use verdant_models::Species;
use verdant_traits::SpeciesStore;

define_table_storage! {
    /// Species records, keyed by species id.
    pub struct SpeciesStorage { table: "species" }
}

impl SpeciesStorage {
    pub fn put(&self, species: &Species) -> Result<()> {
        let bytes = serde_json::to_vec(species)?;
        self.put_raw(&species.id, &bytes)
    }

    pub fn get(&self, id: &str) -> Result<Option<Species>> {
        match self.get_raw(id)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Species>> {
        let mut all = Vec::new();
        for (_, bytes) in self.list_raw()? {
            let species: Species = serde_json::from_slice(&bytes)?;
            if species.owner_id == owner_id {
                all.push(species);
            }
        }
        Ok(all)
    }
}

impl SpeciesStore for SpeciesStorage {
    fn get_species(&self, id: &str) -> Result<Option<Species>> {
        self.get(id)
    }

    fn list_species_by_owner(&self, owner_id: &str) -> Result<Vec<Species>> {
        self.list_by_owner(owner_id)
    }

    fn put_species(&self, species: &Species) -> Result<()> {
        self.put(species)
    }

    fn delete_species(&self, id: &str) -> Result<bool> {
        self.delete_raw(id)
    }
}
