use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use supplier_match::{read_catalog, read_invoice, Distance, MatchConfig, Policy, Resolver};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Resolve the supplier of an OCR-scanned invoice
#[derive(Parser, Debug)]
#[command(name = "supplier-match")]
#[command(about = "Match invoice OCR text against a supplier catalog", long_about = None)]
struct Args {
    /// OCR word list of the invoice
    #[arg(short, long)]
    invoice: PathBuf,

    /// Supplier catalog CSV with `Id` and `SupplierName` columns
    #[arg(short, long, default_value = "suppliernames.txt")]
    suppliers: PathBuf,

    /// JSON file with a matcher configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Normalization and matching policy
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Smallest vocabulary unit size
    #[arg(long, requires = "max_gram")]
    min_gram: Option<usize>,

    /// Largest vocabulary unit size
    #[arg(long, requires = "min_gram")]
    max_gram: Option<usize>,

    /// Smallest query fragment, in words
    #[arg(long, requires = "fragment_max")]
    fragment_min: Option<usize>,

    /// Largest query fragment, in words
    #[arg(long, requires = "fragment_min")]
    fragment_max: Option<usize>,

    /// Neighbor distance
    #[arg(long, value_enum)]
    distance: Option<DistanceArg>,

    /// Print the match as JSON
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyArg {
    Char,
    Word,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DistanceArg {
    Euclidean,
    Cosine,
}

impl Args {
    fn match_config(&self) -> anyhow::Result<MatchConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                MatchConfig::from_json(&text)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => MatchConfig::default(),
        };

        if let Some(policy) = self.policy {
            config.policy = match policy {
                PolicyArg::Char => Policy::CharNgram,
                PolicyArg::Word => Policy::WordNgram,
            };
        }
        if let (Some(min), Some(max)) = (self.min_gram, self.max_gram) {
            config.analyzer_range = Some((min, max));
        }
        if let (Some(min), Some(max)) = (self.fragment_min, self.fragment_max) {
            config.fragment_range = (min, max);
        }
        if let Some(distance) = self.distance {
            config.distance = match distance {
                DistanceArg::Euclidean => Distance::Euclidean,
                DistanceArg::Cosine => Distance::Cosine,
            };
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = args.match_config()?;
    info!("Starting supplier-match v{}", env!("CARGO_PKG_VERSION"));
    info!("Config: {:?}", config);

    let catalog = read_catalog(&args.suppliers)
        .with_context(|| format!("Failed to load catalog {}", args.suppliers.display()))?;
    let words = read_invoice(&args.invoice)
        .with_context(|| format!("Failed to read invoice {}", args.invoice.display()))?;

    let resolver = Resolver::new(config)?
        .load_catalog(catalog)
        .fit()
        .with_context(|| format!("Failed to fit catalog {}", args.suppliers.display()))?;
    let resolution = resolver
        .resolve_words(&words)
        .with_context(|| format!("Failed to resolve invoice {}", args.invoice.display()))?;

    if args.json {
        let out = serde_json::json!({
            "id": resolution.result.supplier_id,
            "name": resolution.result.supplier_name,
            "distance": resolution.distance,
            "fragment": resolution.fragment,
        });
        println!("{}", serde_json::to_string(&out)?);
    } else {
        println!("{}", resolution.result);
    }
    Ok(())
}
