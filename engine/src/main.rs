// Engine main entry point
use anyhow::Context;
use engine::config::settings::{AnalyzerSettings, OutputFormat};
use engine::data::CsvCandleProvider;
use engine::report::render_text;
use engine::services::OrderPointAnalyzer;
use shared::models::TimeFrame;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so JSON output on stdout stays machine-readable.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    // Usage: order-point [config.json] [timeframe]
    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("config.json"));

    info!("Starting Order Point Analyzer...");
    let mut settings = AnalyzerSettings::load(&config_path)
        .with_context(|| format!("loading settings from {}", config_path.display()))?;
    if let Some(arg) = args.next() {
        settings.timeframe = arg.parse::<TimeFrame>().map_err(anyhow::Error::msg)?;
    }

    let provider = CsvCandleProvider::new(settings.data_dir.clone());
    let output = settings.output;
    let analyzer = OrderPointAnalyzer::new(settings);

    let mut failures = 0;
    for (symbol, result) in analyzer.run_all(&provider) {
        match result {
            Ok(report) => match output {
                OutputFormat::Text => println!("{}", render_text(&report)),
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&report).context("serializing report")?;
                    println!("{}", json);
                }
            },
            Err(e) => {
                failures += 1;
                error!(symbol = %symbol, error = %e, "Analysis failed");
            }
        }
    }

    Ok(if failures == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
