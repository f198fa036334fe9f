use anyhow::{Context, Result};
use clap::Parser;
use listing_normalizer::db::{init_db, load_issued_slugs, save_properties, Database};
use listing_normalizer::linear::read_listings;
use listing_normalizer::logging::configure_logging;
use listing_normalizer::{map_parallel, Locale, SlugRegistry};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Normalize Linear listing payloads", long_about = None)]
struct Args {
    /// JSON file with an array of listings or a `{ "data": [...] }` envelope
    #[arg(short, long, env = "LISTINGS_INPUT")]
    input: PathBuf,

    /// Output locale (fi, sv or en)
    #[arg(short, long, env = "LISTINGS_LOCALE", default_value = "fi")]
    locale: Locale,

    /// Write the normalized JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// SQLite snapshot store; also keeps slugs stable between runs
    #[arg(long, env = "LISTINGS_DB")]
    db: Option<String>,

    /// Mapping threads
    #[arg(short, long, default_value_t = 1)]
    workers: usize,

    /// Log directives, used when RUST_LOG is unset
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    configure_logging(args.log.as_deref());

    let listings = read_listings(&args.input)
        .with_context(|| format!("failed to read listings from {}", args.input.display()))?;

    let db = args.db.as_deref().map(Database::new);
    let registry = match &db {
        Some(db) => {
            init_db(db).context("failed to initialize snapshot store")?;
            SlugRegistry::from_issued(load_issued_slugs(db)?)
        }
        None => SlugRegistry::new(),
    };

    let (properties, registry) = map_parallel(&listings, args.locale, args.workers, registry);
    info!(
        "Mapped {} listings ({} slugs issued)",
        properties.len(),
        registry.len()
    );

    if let Some(db) = &db {
        save_properties(db, args.locale, &listings, &properties)
            .context("failed to save properties")?;
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &properties)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            serde_json::to_writer_pretty(&mut writer, &properties)?;
            writeln!(writer)?;
        }
    }

    Ok(())
}
