//! Port definitions.
//!
//! Traits at the boundary between the path logic and the host system.

mod filesystem;

pub use filesystem::{DataFs, LinkKind, OsFs};
