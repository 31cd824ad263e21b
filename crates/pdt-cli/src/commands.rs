use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use pdt_extract::ExtractOptions;
use tracing::info;

use pdt_cli::pipeline::{AnalyzeRequest, analyze_path};
use pdt_cli::types::DocumentAnalysis;
use pdt_ingest::write_template;

use crate::cli::{AnalyzeArgs, TemplateArgs};

pub fn run_analyze(args: &AnalyzeArgs) -> Result<DocumentAnalysis> {
    let request = AnalyzeRequest {
        path: args.path.clone(),
        current_year: args.year.unwrap_or_else(|| Local::now().year()),
        options: ExtractOptions::default().with_skip_grid_weekends(!args.keep_grid_weekends),
        ai_result: args.ai_result.clone(),
    };
    let analysis = analyze_path(&request)
        .with_context(|| format!("analyze {}", args.path.display()))?;
    info!(headline = %analysis.headline(), "analysis complete");
    Ok(analysis)
}

pub fn print_json(analysis: &DocumentAnalysis) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &analysis.result).context("serialize analysis")?;
    writeln!(out)?;
    Ok(())
}

pub fn run_template(args: &TemplateArgs) -> Result<()> {
    let range = args.start.zip(args.end);
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create {}", path.display()))?;
            write_template(BufWriter::new(file), range).context("write template")?;
            println!("Template written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            write_template(stdout.lock(), range).context("write template")?;
        }
    }
    Ok(())
}
