pub mod browser;
pub mod config;
pub mod filter;
pub mod overlay;
pub mod query;
pub mod selection;
pub mod surface;
pub mod view;

#[cfg(test)]
mod test_support;

pub use browser::*;
pub use config::*;
pub use filter::*;
pub use overlay::*;
pub use query::*;
pub use selection::*;
pub use surface::*;
pub use view::*;
