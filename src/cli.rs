//! Command-line interface
//!
//! Every subcommand except `serve` talks to a running relay through
//! [`RelayClient`].

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use crate::config::Settings;
use crate::domain::{ResolvedCatalog, ShippingMethod, DEFAULT_CANVAS_DESCRIPTION};
use crate::workflow::{
    CatalogResolver, ProductFilter, ProductListing, PublishStatus, RelayApi, RelayClient, UploadSession,
};

#[derive(Debug, Parser)]
#[command(name = "canvas-relay", version, about = "Printify canvas relay and upload tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the relay server
    Serve,

    /// List the merchant's shops
    Shops,

    /// Show the canvas provider, sizes, prices and shipping
    Resolve {
        #[arg(long)]
        shop: String,
    },

    /// Prepare an image and create a canvas product from it
    Upload {
        #[arg(long)]
        shop: String,
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        title: String,
        /// Defaults to the standard canvas description
        #[arg(long)]
        description: Option<String>,
        /// Print area background, e.g. #ffffff
        #[arg(long)]
        background: Option<String>,
        /// Shipping method sent with the product
        #[arg(long, value_enum, default_value_t = ShippingMethod::Standard)]
        shipping: ShippingMethod,
        /// Print the payload and validation messages without uploading
        #[arg(long)]
        dry_run: bool,
    },

    /// List the shop's canvas products
    Products {
        #[arg(long)]
        shop: String,
        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,
        /// Print provider id
        #[arg(long)]
        provider: Option<u64>,
        #[arg(long, value_enum, default_value_t = PublishStatus::All)]
        status: PublishStatus,
    },
}

/// Run a workflow subcommand
pub async fn run(command: Command, settings: &Settings) -> anyhow::Result<()> {
    let relay = RelayClient::from_settings(&settings.client)?;

    match command {
        Command::Serve => bail!("serve is handled by the binary"),
        Command::Shops => {
            for shop in relay.shops().await? {
                println!("{}\t{}\t{}", shop.id, shop.title, shop.sales_channel.unwrap_or_default());
            }
        }
        Command::Resolve { shop } => {
            let mut resolver = CatalogResolver::from_settings(&settings.catalog);
            let catalog = resolver.resolve(&relay).await?;
            println!("shop {}", shop);
            print_catalog(catalog);
        }
        Command::Upload { shop, image, title, description, background, shipping, dry_run } => {
            let data = std::fs::read(&image).with_context(|| format!("Failed to read {}", image.display()))?;
            let file_name = image
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image.jpg".to_string());

            let mut session = UploadSession::new(&relay, shop, settings);
            session.initialize().await?;
            let prepared = session.select_image(&data, &file_name)?;
            println!("image {} ({}x{}, {} bytes)", prepared.file_name, prepared.width, prepared.height, prepared.bytes.len());

            session.form.title = title;
            session.form.description = description.unwrap_or_else(|| DEFAULT_CANVAS_DESCRIPTION.to_string());
            if background.is_some() {
                session.form.background = background;
            }
            session.form.shipping_method = shipping;
            if let Some(catalog) = session.catalog() {
                let profile = catalog.shipping.profile(shipping);
                println!(
                    "shipping {}: first ${:.2}, additional ${:.2}",
                    shipping.as_str(),
                    profile.first_item as f64 / 100.0,
                    profile.additional_items as f64 / 100.0
                );
            }

            if dry_run {
                let dry = session.dry_run();
                println!("{}", serde_json::to_string_pretty(&dry.draft)?);
                for message in &dry.messages {
                    println!("invalid: {}", message);
                }
                return Ok(());
            }

            let created = session.submit().await.map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("created product {} in shop {}", created.id, session.shop_id());
        }
        Command::Products { shop, search, provider, status } => {
            let listing = ProductListing::new(settings.catalog.listed_provider_ids.clone(), settings.client.page_size);
            let products = listing.fetch_all(&relay, &shop).await?;
            let filter = ProductFilter { search, provider_id: provider, status };

            for product in filter.apply(&products) {
                println!(
                    "{}\t{}\t{}\t{}",
                    product.id,
                    product.print_provider_id.map(|id| id.to_string()).unwrap_or_default(),
                    if product.visible { "published" } else { "unpublished" },
                    product.title
                );
            }
        }
    }

    Ok(())
}

fn print_catalog(catalog: &ResolvedCatalog) {
    println!("blueprint {} {}", catalog.blueprint.id, catalog.blueprint.title);
    println!("provider {} {}", catalog.provider.id, catalog.provider.title);
    for variant in &catalog.variants {
        let cents = variant.price.unwrap_or_default();
        println!(
            "  {}\t{}\t${}.{:02}",
            variant.id,
            variant.options.size.as_deref().unwrap_or(&variant.title),
            cents / 100,
            cents % 100
        );
    }
    for method in [ShippingMethod::Standard, ShippingMethod::Express] {
        let profile = catalog.shipping.profile(method);
        println!(
            "shipping {}: first ${:.2}, additional ${:.2}, handling {} days",
            method.as_str(),
            profile.first_item as f64 / 100.0,
            profile.additional_items as f64 / 100.0,
            profile.handling_time
        );
    }
}
