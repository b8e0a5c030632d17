//! # Demo Catalog Generator
//!
//! Fills a database with a bulk demo catalog for development.
//!
//! ## Usage
//! ```bash
//! # Generate 2,000 products (default) in the configured database
//! cargo run -p stock-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p stock-db --bin seed -- --count 5000
//!
//! # Specify database path (otherwise STOCK_DB or the platform default)
//! cargo run -p stock-db --bin seed -- --db ./data/demo.db
//! ```
//!
//! ## Generated Products
//! Each product has:
//! - Unique code: `{CATEGORY}-{INDEX}` (e.g. `BEB-00042`)
//! - Name: item + presentation (e.g. "Agua mineral 2L")
//! - Price between 120.00 and 9,999.00
//! - Barcode on every third product
//! - Stock 0, followed by one `IN` movement with the opening quantity, so
//!   the ledger holds the full history from the start

use std::env;
use std::time::Instant;

use stock_core::{MovementKind, NewProduct};
use stock_db::{Database, StoreConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_COUNT: usize = 2000;

const OPENING_NOTE: &str = "Stock inicial";

/// Product families for realistic demo data
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "BEB",
        &[
            "Agua mineral",
            "Gaseosa cola",
            "Gaseosa lima",
            "Jugo naranja",
            "Cerveza rubia",
            "Vino tinto",
            "Soda",
            "Agua saborizada",
        ],
    ),
    (
        "ALM",
        &[
            "Yerba mate",
            "Azucar",
            "Harina 000",
            "Arroz largo fino",
            "Fideos tirabuzon",
            "Aceite girasol",
            "Cafe molido",
            "Te en saquitos",
        ],
    ),
    (
        "LAC",
        &[
            "Leche entera",
            "Leche descremada",
            "Yogur frutilla",
            "Queso cremoso",
            "Manteca",
            "Dulce de leche",
            "Crema de leche",
        ],
    ),
    (
        "LIM",
        &[
            "Lavandina",
            "Detergente",
            "Jabon en polvo",
            "Suavizante",
            "Limpiador piso",
            "Esponja",
        ],
    ),
    (
        "FER",
        &[
            "Tornillo",
            "Tuerca",
            "Clavo",
            "Cinta aisladora",
            "Lija",
            "Pegamento",
        ],
    ),
];

/// Presentations with a price multiplier in percent
const SIZES: &[(&str, u64)] = &[
    ("chico", 80),
    ("mediano", 100),
    ("grande", 140),
    ("500ml", 90),
    ("1L", 120),
    ("2L", 180),
    ("pack x6", 450),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    let mut db_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Demo Catalog Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: {DEFAULT_COUNT})");
                println!("  -d, --db <PATH>    Database file path (default: $STOCK_DB or platform default)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(arg = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let store = match db_path {
        Some(path) => StoreConfig {
            database_path: path.into(),
        },
        None => StoreConfig::from_env()?,
    };

    println!("Stockroom Demo Catalog Generator");
    println!("================================");
    println!("Database: {}", store.database_path.display());
    println!("Products: {count}");
    println!();

    let db = Database::new(store.db_config().seed_catalog(false)).await?;
    println!("✓ Connected to database, migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {existing} products");
        println!("  Skipping seed to avoid duplicate codes.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let products = db.products();
    let ledger = db.ledger();
    let start = Instant::now();
    let mut generated = 0;

    for (index, new_product) in demo_catalog().take(count).enumerate() {
        let opening = opening_stock(index);

        let product = match products.create(&new_product).await {
            Ok(product) => product,
            Err(e) => {
                eprintln!("Failed to insert {}: {e}", new_product.code);
                continue;
            }
        };

        ledger
            .apply_at_current_price(product.id, MovementKind::In, opening, Some(OPENING_NOTE))
            .await?;

        generated += 1;
        if generated % 500 == 0 {
            println!("  Generated {generated} products...");
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {generated} products in {elapsed:?}");
    println!(
        "  Rate: {:.0} products/second",
        generated as f64 / elapsed.as_secs_f64()
    );

    println!();
    println!("Verifying search...");
    for filter in ["leche", "BEB-", "2l"] {
        let found = db.products().list(filter).await?;
        println!("  Search '{filter}': {} results", found.len());
    }

    let movements = db.movements().recent(None).await?;
    info!(recent_movements = movements.len(), "Seed complete");

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Initializes the tracing subscriber. `RUST_LOG` overrides the default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stock=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}

/// Endless, deterministic stream of demo products.
fn demo_catalog() -> impl Iterator<Item = NewProduct> {
    (0usize..).map(|seed| {
        let (category, items) = CATEGORIES[seed % CATEGORIES.len()];
        let item = items[(seed / CATEGORIES.len()) % items.len()];
        let (size, multiplier) = SIZES[(seed / 7) % SIZES.len()];

        let base_cents = 15_000 + ((seed as u64 * 7_919) % 500_000);
        let price = (base_cents * multiplier / 100).min(999_900) as f64 / 100.0;

        let product = NewProduct::new(format!("{category}-{seed:05}"), format!("{item} {size}"))
            .unit_price(price);

        if seed % 3 == 0 {
            product.barcode(format!("779{seed:010}"))
        } else {
            product
        }
    })
}

/// Opening quantity for the n-th product: 1..=120.
fn opening_stock(index: usize) -> i64 {
    (index % 120) as i64 + 1
}
