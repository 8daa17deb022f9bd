pub mod appearance;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod host;
pub mod layout;
pub mod scene;
pub mod timeline;

pub use appearance::*;
pub use config::*;
pub use constants::*;
pub use dataset::*;
pub use error::*;
pub use host::*;
pub use layout::*;
pub use scene::*;
pub use timeline::*;
