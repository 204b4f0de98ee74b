//! Permission resolution and ability evaluation for admins.

pub mod ability;
pub mod resolver;

pub use ability::{Ability, AbilityCheck};
pub use resolver::{PermissionResolver, ResolvedGrants};
