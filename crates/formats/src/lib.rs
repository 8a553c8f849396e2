pub mod boundaries;
pub mod zone_number;

pub use boundaries::*;
pub use zone_number::*;
