// src/main.rs
use clap::Parser;
use sec_revenue_extractor::edgar::client;
use sec_revenue_extractor::storage::StorageManager;
use sec_revenue_extractor::utils::{self, AppError};
use sec_revenue_extractor::{ExtractionMethod, ExtractorConfig, RevenueBreakdownExtractor};
use std::path::Path;

/// Command Line Interface for the SEC revenue breakdown extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Local filing document (HTML) to extract from
    #[arg(short, long, conflicts_with = "url", required_unless_present = "url")]
    input: Option<String>,

    /// Filing document URL to download and extract from
    #[arg(short, long)]
    url: Option<String>,

    /// Company identifier, used for logging and output layout only
    #[arg(short, long)]
    company: Option<String>,

    /// Output directory for extraction results
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// JSON file overriding extractor defaults
    #[arg(long)]
    config: Option<String>,

    /// User-Agent sent to EDGAR when downloading
    #[arg(long, default_value = client::DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Print the result JSON to stdout instead of writing files
    #[arg(long)]
    stdout: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Load extractor configuration
    let config = match &args.config {
        Some(path) => ExtractorConfig::from_file(path)?,
        None => ExtractorConfig::default(),
    };

    // 4. Acquire the filing document
    let (content, source_name) = match (&args.input, &args.url) {
        (Some(path), _) => {
            tracing::info!("Reading filing from: {}", path);
            (std::fs::read_to_string(path)?, source_stem(path))
        }
        (None, Some(url)) => {
            let body = client::download_filing_doc(url, &args.user_agent).await?;
            tracing::info!("Successfully downloaded document ({} bytes)", body.len());
            (body, source_stem(url))
        }
        (None, None) => {
            return Err(AppError::Config("Either --input or --url is required".to_string()));
        }
    };

    // 5. Extract the revenue breakdown
    let extractor = RevenueBreakdownExtractor::new(&config);
    let result = extractor.extract_from_html(&content, args.company.as_deref());

    tracing::info!(
        "Extraction finished: method={}, confidence={}, categories={}",
        result.extraction_method,
        result.confidence_score,
        result.revenue_breakdown.len()
    );

    // 6. Emit the result
    if args.stdout {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| AppError::Config(format!("Could not serialize result: {}", e)))?;
        println!("{}", json);
    } else {
        let company = args.company.as_deref().unwrap_or("UNKNOWN");
        let storage = StorageManager::new(&args.output_dir)?;
        let path = storage.save_result(company, &source_name, &result)?;
        tracing::info!("Saved result to: {}", path.display());
        match storage.save_result_metadata(company, &source_name, &result) {
            Ok(path) => tracing::info!("Saved result metadata to: {}", path.display()),
            Err(e) => tracing::error!("Failed to save result metadata: {}", e),
        }
    }

    if result.extraction_method == ExtractionMethod::Failed {
        tracing::warn!("Extraction failed: {}", result.error.as_deref().unwrap_or("unknown error"));
    }

    Ok(())
}

/// File stem of a path or URL, used to name output files.
fn source_stem(location: &str) -> String {
    let last = location.trim_end_matches('/').rsplit('/').next().unwrap_or(location);
    Path::new(last)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("filing")
        .to_string()
}
