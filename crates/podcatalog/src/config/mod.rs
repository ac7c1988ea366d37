pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_from_str, validate_discovery, validate_export};
pub use schema::{
    DiscoveryConfig, ExportConfig, RunConfig, DEFAULT_COUNTRY, DEFAULT_DATABASE_PATH,
    DEFAULT_OWNER_ID, MAX_PAGE_LIMIT,
};
