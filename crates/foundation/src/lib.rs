pub mod bounds;
pub mod zone;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use zone::*;
