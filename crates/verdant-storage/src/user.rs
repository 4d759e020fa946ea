//! User storage - identity lookups for grantee resolution and display
//! annotation.

use crate::define_table_storage;
use anyhow::Result;
use verdant_models::User;
use verdant_traits::UserStore;

define_table_storage! {
    /// User records, keyed by user id.
    pub struct UserStorage { table: "users" }
}

impl UserStorage {
    pub fn put(&self, user: &User) -> Result<()> {
        let bytes = serde_json::to_vec(user)?;
        self.put_raw(&user.id, &bytes)
    }

    pub fn get(&self, id: &str) -> Result<Option<User>> {
        match self.get_raw(id)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Case-insensitive email lookup.
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        for (_, bytes) in self.list_raw()? {
            let user: User = serde_json::from_slice(&bytes)?;
            if user.email.eq_ignore_ascii_case(email) {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }
}

impl UserStore for UserStorage {
    fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.get(id)
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.find_by_email(email)
    }

    fn put_user(&self, user: &User) -> Result<()> {
        self.put(user)
    }
}
