use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;
use storefront_core::{
    config::DisplayConfig, Cart, Catalog, CatalogProvider, Config, FakeStoreProvider, Product,
    ProductId, Query, SortKey,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(version, about = "Browse, search and fill a cart from a product catalog", long_about = None)]
struct Cli {
    /// Catalog API root (overrides the config file)
    #[arg(long, global = true, env = "STOREFRONT_API_URL")]
    api_url: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args, Debug)]
struct FilterArgs {
    /// Lowest price to include
    #[arg(long)]
    min: Option<Decimal>,

    /// Highest price to include
    #[arg(long)]
    max: Option<Decimal>,

    /// default, price-asc, price-desc, rating-desc, name-asc or relevance
    #[arg(long, default_value = "default")]
    sort: SortKey,
}

impl FilterArgs {
    fn to_query(&self) -> Query {
        Query::new()
            .price_between(self.min, self.max)
            .sort_by(self.sort)
    }
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List every product
    Products {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Search titles, descriptions and categories
    Search {
        /// Search text
        query: String,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// List one category
    Category {
        /// Category name, e.g. "men's clothing"
        name: String,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show product details
    Show {
        /// Product id
        id: u64,
    },
    /// List the catalog's categories
    Categories,
    /// Build a cart for this session and print its totals
    Cart {
        /// Product to add as ID or ID=QTY; a bare ID adds one unit (repeatable)
        #[arg(long = "add", value_parser = parse_add)]
        add: Vec<(u64, u32)>,

        /// Set a quantity as ID=QTY; zero or less removes the line (repeatable)
        #[arg(long = "set", value_parser = parse_quantity)]
        set: Vec<(u64, i64)>,

        /// Product id to remove (repeatable)
        #[arg(long = "remove")]
        remove: Vec<u64>,
    },
}

fn parse_quantity(s: &str) -> Result<(u64, i64), String> {
    let (id, qty) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QTY, got '{}'", s))?;
    let id = id
        .trim()
        .parse()
        .map_err(|e| format!("bad product id '{}': {}", id, e))?;
    let qty = qty
        .trim()
        .parse()
        .map_err(|e| format!("bad quantity '{}': {}", qty, e))?;
    Ok((id, qty))
}

fn parse_add(s: &str) -> Result<(u64, u32), String> {
    if !s.contains('=') {
        let id = s
            .trim()
            .parse()
            .map_err(|e| format!("bad product id '{}': {}", s, e))?;
        return Ok((id, 1));
    }

    let (id, qty) = parse_quantity(s)?;
    let qty = u32::try_from(qty).map_err(|_| format!("cannot add {} units", qty))?;
    Ok((id, qty))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so listings stay pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "storefront=info,storefront_core=info,storefront_api=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load config")?;

    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    let Some(command) = cli.command else {
        println!("No command specified. Try --help");
        return Ok(());
    };

    let provider = FakeStoreProvider::new(&config.api)?;
    let display = &config.display;

    match command {
        Commands::Products { filters } => {
            let catalog = Catalog::load(&provider).await?;
            let view = catalog.query(&filters.to_query());
            print_listing(&view, display);
        }
        Commands::Search { query, filters } => {
            tracing::info!("Searching for: {}", query);
            if query.trim().is_empty() {
                println!("Enter something to search for.");
                return Ok(());
            }

            let catalog = Catalog::load(&provider).await?;
            let view = catalog.query(&filters.to_query().text(query.as_str()));
            println!(
                "{} result{} for \"{}\"",
                view.len(),
                plural(view.len()),
                query.trim()
            );
            print_listing(&view, display);
        }
        Commands::Category { name, filters } => {
            let catalog = Catalog::load_category(&provider, &name).await?;
            let range = catalog.price_range();
            let view = catalog.query(&filters.to_query());
            println!(
                "{}: {} of {} product{} (prices {} - {})",
                name,
                view.len(),
                catalog.len(),
                plural(catalog.len()),
                display.format_price(range.min),
                display.format_price(range.max)
            );
            print_listing(&view, display);
        }
        Commands::Show { id } => {
            let product = provider.fetch_product(ProductId(id)).await?;
            print_details(&product, display);
        }
        Commands::Categories => {
            for category in provider.fetch_categories().await? {
                println!("{}", category);
            }
        }
        Commands::Cart { add, set, remove } => {
            let catalog = Catalog::load(&provider).await?;
            let mut cart = Cart::new();

            for (id, qty) in add {
                let product = catalog
                    .get(ProductId(id))
                    .ok_or(storefront_core::Error::NotFound(ProductId(id)))?;
                cart.add_quantity(product, qty);
            }
            for (id, qty) in set {
                cart.set_quantity(ProductId(id), qty);
            }
            for id in remove {
                cart.remove(ProductId(id));
            }

            print_cart(&cart, display);
        }
    }

    Ok(())
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

fn print_listing(products: &[&Product], display: &DisplayConfig) {
    if products.is_empty() {
        println!("No products found.");
        return;
    }

    for product in products {
        println!(
            "{:>4}  {:<60}  {:>10}  {}  {}",
            product.id,
            truncate(&product.title, 60),
            display.format_price(product.price),
            product.stars().render(),
            product.category
        );
    }
}

fn print_details(product: &Product, display: &DisplayConfig) {
    println!("{}", product.title);
    println!("  {}", product.category);
    match product.rating {
        Some(rating) => println!(
            "  {} {:.1} ({} reviews)",
            product.stars().render(),
            rating.rate,
            rating.count
        ),
        None => println!("  {} no reviews", product.stars().render()),
    }
    println!("  {}", display.format_price(product.price));
    println!();
    println!("{}", product.description);
    println!();
    println!("{}", product.image);
}

fn print_cart(cart: &Cart, display: &DisplayConfig) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for line in cart.lines() {
        println!(
            "{:>4}  {:<50}  {:>3} x {:>10} = {:>10}",
            line.product.id,
            truncate(&line.product.title, 50),
            line.quantity,
            display.format_price(line.product.price),
            display.format_price(line.subtotal())
        );
    }
    println!(
        "{} item{}, total {}",
        cart.item_count(),
        plural(cart.item_count() as usize),
        display.format_price(cart.total())
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
