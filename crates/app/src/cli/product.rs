use std::path::PathBuf;

use clap::{Args, Subcommand};
use frutos::{
    pricing::format_price,
    products::{ProductDraft, ProductPatch},
};
use frutos_app::{
    context::AppContext,
    domain::products::{ProductFilter, ProductUuid, StoredProduct},
};

use crate::cli::{describe_error, read_document};

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    /// Create a product from a draft file
    Create(CreateProductArgs),

    /// Apply a partial update file to a product
    Update(UpdateProductArgs),

    /// List the catalog
    List(ListProductsArgs),

    /// Show a single product
    Show(ProductArgs),

    /// Delete a product
    Delete(ProductArgs),

    /// List every category in use
    Categories,
}

#[derive(Debug, Args)]
struct CreateProductArgs {
    /// YAML or JSON product draft
    #[arg(long)]
    file: PathBuf,
}

#[derive(Debug, Args)]
struct UpdateProductArgs {
    /// Product UUID
    uuid: ProductUuid,

    /// YAML or JSON file with the fields to change
    #[arg(long)]
    file: PathBuf,
}

#[derive(Debug, Args)]
struct ListProductsArgs {
    /// Only products in this category
    #[arg(long)]
    category: Option<String>,

    /// Hide sold out products
    #[arg(long)]
    in_stock: bool,
}

#[derive(Debug, Args)]
struct ProductArgs {
    /// Product UUID
    uuid: ProductUuid,
}

pub(crate) async fn run(context: &AppContext, command: ProductCommand) -> Result<(), String> {
    match command.command {
        ProductSubcommand::Create(args) => {
            let draft: ProductDraft = read_document(&args.file)?;

            let record = context
                .products
                .create_product(draft)
                .await
                .map_err(|error| describe_error("create product", &error))?;

            print_product(&record);
        }
        ProductSubcommand::Update(args) => {
            let patch: ProductPatch = read_document(&args.file)?;

            if patch.is_empty() {
                return Err("update file changes no fields".to_string());
            }

            let record = context
                .products
                .update_product(args.uuid, patch)
                .await
                .map_err(|error| describe_error("update product", &error))?;

            print_product(&record);
        }
        ProductSubcommand::List(args) => {
            let products = context
                .products
                .list_products(ProductFilter {
                    category: args.category,
                    in_stock_only: args.in_stock,
                })
                .await
                .map_err(|error| describe_error("list products", &error))?;

            if products.is_empty() {
                println!("no products found");
                return Ok(());
            }

            for record in products {
                let starting = record
                    .product
                    .starting_price()
                    .map_or_else(|| "agotado".to_string(), format_price);

                println!(
                    "{}  {}  [{}]  desde {starting}",
                    record.uuid,
                    record.product.name(),
                    record.product.category()
                );
            }
        }
        ProductSubcommand::Show(args) => {
            let record = context
                .products
                .get_product(args.uuid)
                .await
                .map_err(|error| describe_error("show product", &error))?;

            print_product(&record);
        }
        ProductSubcommand::Delete(args) => {
            context
                .products
                .delete_product(args.uuid)
                .await
                .map_err(|error| describe_error("delete product", &error))?;

            println!("deleted product {}", args.uuid);
        }
        ProductSubcommand::Categories => {
            let categories = context
                .products
                .list_categories()
                .await
                .map_err(|error| describe_error("list categories", &error))?;

            for category in categories {
                println!("{category}");
            }
        }
    }

    Ok(())
}

fn print_product(record: &StoredProduct) {
    let product = &record.product;

    println!("uuid: {}", record.uuid);
    println!("name: {}", product.name());
    println!("description: {}", product.description());
    println!("category: {}", product.categories().join(", "));
    println!("price_per_kilo: {}", format_price(product.price_per_kilo()));
    println!("discount: {}%", product.discount());
    println!("total_stock: {}", product.total_stock());
    println!("primary_image: {}", product.primary_image_url());
    println!("tiers:");

    for tier in product.tiers() {
        let price = product
            .discounted_tier_price(tier.weight())
            .unwrap_or(tier.price());

        println!(
            "  {:>5}  {:>12}  stock {}",
            tier.weight().label(),
            format_price(price),
            tier.stock()
        );
    }

    println!("updated_at: {}", record.updated_at);
}
