use std::path::PathBuf;

use dotenv::dotenv;
use eyre::eyre;
use tracing::info;
use tracing_subscriber::EnvFilter;

use flat_forest::{
    build_from_roots, build_ordered,
    utils::{pretty_print_forest, read_records},
    FieldNames,
};

fn main() -> eyre::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| dotenv::var("TREE_RECORDS_PATH").ok())
        .map(PathBuf::from)
        .ok_or_else(|| eyre!("usage: flat-forest <records.json> (or set TREE_RECORDS_PATH)"))?;

    let fields = FieldNames::from_env()?;
    let records = read_records(&path)?;
    info!(path = %path.display(), records = records.len(), "Loaded records");

    let layered = !records.is_empty() && records.iter().all(|r| r.contains_key(&fields.layer));
    let forest = if layered {
        build_ordered(&records, &fields)?
    } else {
        build_from_roots(&records, &fields)?
    };

    pretty_print_forest(&forest, &fields.key);
    println!("{}", serde_json::to_string_pretty(&forest)?);

    Ok(())
}
