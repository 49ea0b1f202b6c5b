use anyhow::Result;
use avl::{Imbalance, Observer, Tree};
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "avl", about = "Build an AVL tree, delete from it and query it")]
struct Cli {
    /// Keys to insert, in order.
    #[arg(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        default_values_t = [9, 5, 10, 0, 6, 11, -1, 1, 2]
    )]
    insert: Vec<i64>,
    /// Keys to delete after inserting, in order.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, default_values_t = [10, 11])]
    delete: Vec<i64>,
    /// Closed range of keys to list.
    #[arg(
        long,
        num_args = 2,
        value_names = ["LOW", "HIGH"],
        allow_negative_numbers = true,
        default_values_t = [1, 9]
    )]
    range: Vec<i64>,
    /// Key whose depth is reported.
    #[arg(long, allow_negative_numbers = true, default_value_t = 6)]
    depth: i64,
    /// Print every node with its parent in pre-order.
    #[arg(long)]
    edges: bool,
    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

/// Logs every rebalance with the key it happened at.
struct LogRotations;

impl Observer<i64> for LogRotations {
    fn rebalanced(&mut self, case: Imbalance, pivot: &i64) {
        info!(%case, pivot, "rebalancing");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut tree = Tree::with_observer(LogRotations);

    for key in &cli.insert {
        if let Err(error) = tree.insert(*key) {
            warn!(%error, "skipping key");
        }
    }
    println!("after inserting: {:?}", tree.in_order());

    for key in &cli.delete {
        if tree.delete(key).is_none() {
            warn!(key, "key not in tree, nothing deleted");
        }
    }
    println!("after deleting: {:?}", tree.in_order());

    let (low, high) = match cli.range.as_slice() {
        [low, high] => (*low, *high),
        _ => anyhow::bail!("--range takes exactly two keys"),
    };
    let mut in_range = tree.keys_in_range(&low, &high);
    in_range.sort();
    println!("keys in [{low}, {high}]: {in_range:?}");

    match tree.depth_of(&cli.depth) {
        Some(depth) => println!("key {} is at depth {depth}", cli.depth),
        None => println!("key {} was not found", cli.depth),
    }

    if cli.edges {
        for view in tree.nodes() {
            match view.parent {
                Some(parent) => println!("{parent} -> {} ({:?})", view.key, view.shape),
                None => println!("{} ({:?}, root)", view.key, view.shape),
            }
        }
    }

    info!(len = tree.len(), height = tree.height(), "done");
    Ok(())
}
