use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use moqt_point::inspector::{inspect_path, write_json, ApiKind, ApiShape, InspectConfig};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "point_api", version, about = "Report the public API shape of a Rust type")]
struct Cli {
    /// Rust source file or directory to inspect
    #[arg(short, long, value_name = "path")]
    path: PathBuf,

    /// Type whose API is reported
    #[arg(short = 't', long = "type", value_name = "name", default_value = "Point2D")]
    type_name: String,

    /// Repository identifier mixed into record ids
    #[arg(long, value_name = "string", default_value = "local")]
    repo_id: String,

    /// Emit JSON instead of the colored report
    #[arg(long)]
    json: bool,

    /// Output file for JSON (default stdout)
    #[arg(long, value_name = "file", requires = "json")]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = InspectConfig {
        path: cli.path.clone(),
        type_name: cli.type_name.clone(),
        repo_id: cli.repo_id.clone(),
    };
    let shape = inspect_path(&cfg)?;

    if !cli.json {
        print_report(&cfg, &shape);
        return Ok(());
    }

    match cli.out {
        Some(p) => {
            let f = File::create(&p).with_context(|| format!("Failed to create {}", p.display()))?;
            write_json(&shape, &mut BufWriter::new(f))?;
            eprintln!("[point_api] Wrote {} records to {}", shape.records.len(), p.display());
        }
        None => {
            let mut out = io::stdout().lock();
            write_json(&shape, &mut out)?;
        }
    }
    Ok(())
}

fn print_report(cfg: &InspectConfig, shape: &ApiShape) {
    println!(
        "{}",
        format!("API of {} in {}", shape.type_name, cfg.path.display())
            .bold()
            .blue()
    );

    if shape.is_empty() {
        println!("{}", format!("No public API found for {}.", shape.type_name).yellow());
        return;
    }

    for kind in ApiKind::ALL {
        let mut records = shape.of_kind(kind).peekable();
        if records.peek().is_none() {
            continue;
        }
        println!("{}", kind.label().bold());
        for rec in records {
            print!("  {} {}", rec.symbol.cyan(), rec.signature.dimmed());
            if !rec.sugar_for.is_empty() {
                print!(" {}", format!("(via {})", rec.sugar_for.join(", ")).green());
            }
            println!("  {}:{}", rec.path, rec.start_line);
        }
    }

    let summary = shape
        .summary()
        .into_iter()
        .map(|(kind, n)| format!("{} {}", n, kind.label()))
        .collect::<Vec<_>>()
        .join(", ");
    println!();
    println!("{}", format!("Summary: {}", summary).green());
}
