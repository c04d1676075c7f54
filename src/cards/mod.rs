//! Card system: definitions and editions.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier two tiles must share to match
//! - `CardDefinition`: Static card data (name, image)
//! - `EditionId`: The closed set of themed editions
//! - `EditionMap`: Per-edition lookup table
//! - `Edition`: A loaded card set

pub mod definition;
pub mod edition;

pub use definition::{CardDefinition, CardId};
pub use edition::{Edition, EditionError, EditionId, EditionMap, EditionRecord};
