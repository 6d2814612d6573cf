use std::{fs, path::Path};

use clap::{Parser, Subcommand};
use frutos_app::{config::AppConfig, context::AppContext, domain::products::ProductsServiceError};
use serde::de::DeserializeOwned;

mod cart;
mod product;

#[derive(Debug, Parser)]
#[command(name = "frutos-app", about = "Frutos Secos Premium CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage the product catalog
    Product(product::ProductCommand),

    /// Manage the shopping cart
    Cart(cart::CartCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let context = AppContext::from_storage_config(&self.config.storage);

        match self.command {
            Commands::Product(command) => product::run(&context, command).await,
            Commands::Cart(command) => cart::run(&context, command).await,
        }
    }
}

/// Read a YAML (`.yml`/`.yaml`) or JSON document.
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let contents = fs::read_to_string(path)
        .map_err(|error| format!("failed to read {}: {error}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| matches!(extension, "yml" | "yaml"));

    if is_yaml {
        serde_norway::from_str(&contents)
            .map_err(|error| format!("failed to parse {}: {error}", path.display()))
    } else {
        serde_json::from_str(&contents)
            .map_err(|error| format!("failed to parse {}: {error}", path.display()))
    }
}

fn describe_error(action: &str, error: &ProductsServiceError) -> String {
    let fields = error.field_messages();

    if fields.is_empty() {
        return format!("failed to {action}: {error}");
    }

    let mut message = format!("failed to {action}:");

    for (field, reason) in fields {
        message.push_str(&format!("\n  {field}: {reason}"));
    }

    message
}
