//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Where the product store and cart files live.
#[derive(Debug, Clone, Args)]
pub struct StorageConfig {
    /// Data directory
    #[arg(long, env = "FRUTOS_DATA_DIR", default_value = ".frutos", global = true)]
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// JSON document file holding the catalog
    #[must_use]
    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join("products.json")
    }

    /// Directory holding the persisted cart
    #[must_use]
    pub fn carts_dir(&self) -> PathBuf {
        self.data_dir.join("carts")
    }
}
