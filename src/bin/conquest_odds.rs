use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;
use std::io::{self, Write};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;
use war_game::odds::OddsTable;

/// Prints the chance of conquering a territory by attacking until one side gives out
#[derive(Parser, Debug)]
#[command(name = "conquest_odds")]
struct Args {
    /// Largest attacking troop count in the table
    #[arg(long, default_value = "10")]
    max_attack: u32,

    /// Largest defending troop count in the table
    #[arg(long, default_value = "10")]
    max_defend: u32,

    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct OddsRow {
    attacker_troops: u32,
    defender_troops: u32,
    percent: f64,
}

fn compute_rows(max_attack: u32, max_defend: u32) -> Vec<OddsRow> {
    // Each attacker row gets its own cache.
    (2..=max_attack)
        .into_par_iter()
        .flat_map_iter(|attacker_troops| {
            let mut odds = OddsTable::new();
            (1..=max_defend)
                .map(|defender_troops| OddsRow {
                    attacker_troops,
                    defender_troops,
                    percent: odds.conquest_percent(attacker_troops, defender_troops),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

fn write_text(out: &mut impl Write, rows: &[OddsRow], max_defend: u32) -> io::Result<()> {
    write!(out, "{:>6}", "A\\D")?;
    for defender in 1..=max_defend {
        write!(out, "{defender:>8}")?;
    }
    writeln!(out)?;

    for row in rows.chunks(max_defend as usize) {
        write!(out, "{:>6}", row[0].attacker_troops)?;
        for cell in row {
            write!(out, "{:>7.2}%", cell.percent)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.max_attack < 2 || args.max_defend < 1 {
        return Err("need --max-attack >= 2 and --max-defend >= 1".into());
    }

    let start = Instant::now();
    let rows = compute_rows(args.max_attack, args.max_defend);
    info!(cells = rows.len(), elapsed = ?start.elapsed(), "odds computed");

    let mut out = io::stdout().lock();
    match args.format {
        OutputFormat::Text => write_text(&mut out, &rows, args.max_defend)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?,
    }
    Ok(())
}
