//! RON catalog loaders.
//!
//! Catalogs are embedded in the crate via `include_str!` and parsed once at
//! startup into lookup registries. The runtime wraps these in oracle
//! implementations; the engine never reads files itself.

mod skills;
mod spells;

pub use skills::SkillCatalog;
pub use spells::SpellCatalog;
