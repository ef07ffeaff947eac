//! `cs-spatial` — cell-site registry and nearest-site resolution.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`registry`] | `Site`, `SiteRegistry` (ordered sites + R-tree), builder    |
//! | [`resolver`] | `SiteResolver` trait, `LinearScan`, `SpatialIndex`          |
//! | [`loader`]   | `load_sites_csv`, `load_sites_reader`                       |
//! | [`source`]   | `SiteSource` (file vs. synthetic), `generate_synthetic`     |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `cs-core` types.        |

pub mod error;
pub mod loader;
pub mod registry;
pub mod resolver;
pub mod source;


pub use error::{SpatialError, SpatialResult};
pub use loader::{load_sites_csv, load_sites_reader};
pub use registry::{Site, SiteRegistry, SiteRegistryBuilder};
pub use resolver::{LinearScan, SiteResolver, SpatialIndex};
pub use source::{SiteSource, generate_synthetic};
