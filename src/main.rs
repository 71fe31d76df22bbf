use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

mod dataset;
mod error;
mod models;
mod report;
mod risk;
mod schema;

#[derive(Parser)]
#[command(name = "mental-health-risk-evaluator")]
#[command(about = "Student mental health risk evaluator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a survey export and list the highest-risk students
    Score {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Emit the ranked list as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Score a survey export and write the full risk report
    Report {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = report::REPORT_FILENAME)]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score { input, limit, json } => {
            let dataset = dataset::load(&input)?;
            let columns = dataset::validate_columns(&dataset)?;
            let scored = risk::score_dataset(&dataset, &columns)?;
            let ranked = report::ranked(&scored);

            if json {
                let top = &ranked[..ranked.len().min(limit)];
                println!("{}", serde_json::to_string_pretty(top)?);
            } else if ranked.is_empty() {
                println!("No student rows found in {}.", input.display());
            } else {
                println!("Top students by risk score:");
                for student in ranked.iter().take(limit) {
                    println!(
                        "- {} score {:.2} ({})",
                        student.student_number,
                        student.risk_score,
                        student.risk_level.label()
                    );
                }
            }
        }
        Commands::Report { input, out } => {
            let dataset = dataset::load(&input)?;
            let columns = dataset::validate_columns(&dataset)?;
            let scored = risk::score_dataset(&dataset, &columns)?;
            let table = report::build_report(&dataset, &scored);

            let mut cache = report::ExportCache::default();
            let bytes = cache.bytes_for(&table)?;
            std::fs::write(&out, bytes)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!(
                "Report written to {} ({} students).",
                out.display(),
                scored.len()
            );
        }
    }

    Ok(())
}
