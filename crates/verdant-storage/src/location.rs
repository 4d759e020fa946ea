//! Location storage - typed persistence for locations.

use crate::define_table_storage;
use anyhow::Result;
use verdant_models::Location;
use verdant_traits::LocationStore;

define_table_storage! {
    /// Location records, keyed by location id.
    pub struct LocationStorage { table: "locations" }
}

impl LocationStorage {
    pub fn put(&self, location: &Location) -> Result<()> {
        let bytes = serde_json::to_vec(location)?;
        self.put_raw(&location.id, &bytes)
    }

    pub fn get(&self, id: &str) -> Result<Option<Location>> {
        match self.get_raw(id)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Location>> {
        let mut locations = Vec::new();
        for (_, bytes) in self.list_raw()? {
            let location: Location = serde_json::from_slice(&bytes)?;
            if location.owner_id == owner_id {
                locations.push(location);
            }
        }
        Ok(locations)
    }

    pub fn find_default(&self, owner_id: &str) -> Result<Option<Location>> {
        Ok(self
            .list_by_owner(owner_id)?
            .into_iter()
            .find(|location| location.is_default))
    }
}

impl LocationStore for LocationStorage {
    fn get_location(&self, id: &str) -> Result<Option<Location>> {
        self.get(id)
    }

    fn list_locations_by_owner(&self, owner_id: &str) -> Result<Vec<Location>> {
        self.list_by_owner(owner_id)
    }

    fn find_default_location(&self, owner_id: &str) -> Result<Option<Location>> {
        self.find_default(owner_id)
    }

    fn put_location(&self, location: &Location) -> Result<()> {
        self.put(location)
    }

    fn delete_location(&self, id: &str) -> Result<bool> {
        self.delete_raw(id)
    }
}
