//! Collaborator provider traits.

pub mod audio;
pub mod coherence;
pub mod facial;
pub mod star;
