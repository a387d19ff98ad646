//! Concrete collaborator providers.

pub mod assembly_ai;
pub mod recorded;
