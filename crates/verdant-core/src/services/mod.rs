//! Service layer: free async functions over [`crate::AppCore`].
//!
//! Every mutating or care-related operation gates through
//! [`permissions`] before touching state and fails closed.

pub mod care;
pub mod locations;
pub mod permissions;
pub mod plants;
pub mod roles;
pub mod shares;
pub mod todos;

#[cfg(test)]
pub(crate) mod test_support;
