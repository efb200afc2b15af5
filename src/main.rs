use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hemascan::{catalog, config, ReportAnalysis, ReportAnalyzer};

/// Analyze a blood test report and summarize the findings.
#[derive(Parser)]
#[command(name = "hemascan", version, about)]
struct Cli {
    /// Path to the report text file
    file: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Also write the output to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} v{}", config::APP_NAME, config::APP_VERSION);

    let text = fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    let analysis = match ReportAnalyzer::default().analyze(&text) {
        Ok(analysis) => analysis,
        Err(err) => {
            if cli.json {
                println!("{}", serde_json::json!({ "error": err.to_string() }));
            } else {
                eprintln!("Error: {err}");
            }
            std::process::exit(1);
        }
    };

    let rendered = if cli.json {
        serde_json::to_string_pretty(&analysis).context("failed to serialize analysis")?
    } else {
        render_text(&analysis)
    };

    println!("{rendered}");

    if let Some(path) = &cli.output {
        fs::write(path, &rendered)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "analysis written");
    }

    Ok(())
}

fn render_text(analysis: &ReportAnalysis) -> String {
    let mut out = String::from("=== Blood Report Analysis ===\n\n");

    out.push_str(&format!("Summary: {}\n\n", analysis.summary));

    if !analysis.warnings.is_empty() {
        out.push_str("Warnings:\n");
        for warning in &analysis.warnings {
            out.push_str(&format!("- {warning}\n"));
        }
        out.push('\n');
    }

    out.push_str("Key Insights:\n");
    for insight in &analysis.insights {
        out.push_str(&format!("- {insight}\n"));
    }

    out.push_str("\n=== Blood Test Values by Category ===\n");
    for (category, tests) in &analysis.categorized_results {
        out.push_str(&format!("\n{} ({} tests):\n", category, tests.len()));
        if let Some(description) = catalog::shared().category_description(category) {
            out.push_str(&format!("  {description}\n"));
        }
        for (code, value) in tests {
            out.push_str(&format!("  {code}: {value}\n"));
        }
    }

    out
}
