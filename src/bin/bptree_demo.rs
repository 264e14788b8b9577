//! Demo driver: seeds a tree with sequential keys and prints its structure.
#![forbid(unsafe_code)]

use std::error::Error;
use std::io::{self, Write};

use bptree::logging::init_logging;
use bptree::{IndexConfig, OrderedIndex, DEFAULT_ORDER};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "bptree-demo",
    version,
    about = "Insert sequential keys into a B+ tree and print its structure"
)]
struct Cli {
    #[arg(long, default_value_t = DEFAULT_ORDER, help = "Tree order (split threshold)")]
    order: usize,

    #[arg(long, default_value_t = 16, help = "Number of keys to insert, starting at 1")]
    count: i64,

    #[arg(long, help = "Insert keys from largest to smallest")]
    descending: bool,

    #[arg(long, default_value = "v", help = "Prefix for generated values")]
    value_prefix: String,

    #[arg(long, default_value = "warn", help = "Log filter, e.g. debug or bptree=trace")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let mut tree = OrderedIndex::with_config(IndexConfig::new(cli.order))?;
    let keys: Box<dyn Iterator<Item = i64>> = if cli.descending {
        Box::new((1..=cli.count).rev())
    } else {
        Box::new(1..=cli.count)
    };
    for key in keys {
        tree.insert(key, format!("{}{}", cli.value_prefix, key));
    }
    info!(entries = tree.len(), height = tree.height(), "seeded tree");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "B+ tree structure:")?;
    tree.write_dump(&mut out)?;
    writeln!(out, "{}", tree.stats())?;
    Ok(())
}
