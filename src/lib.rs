pub mod catalog;
pub mod config;
pub mod logging;
pub mod render;
pub mod server;

// Curated re-exports
pub use catalog::{Catalog, CatalogError, ColorRecord, Rgb};
pub use config::ServerConfig;
pub use render::{render_png, render_swatch, SWATCH_SIZE};
pub use server::{router, ApiError};
