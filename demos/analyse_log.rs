// Analyse a GC log from disk and print the summary, optionally followed by one view as CSV.
//
// Usage: cargo run --example analyse_log -- LOG_PATH [VIEW]
//   VIEW  view name or id (raw, yg-memory, duration, reclaimed, full-memory, memory-util-post)

use gcanalyser::projector::Projector;
use gcanalyser::{csv_writer, parser, stats};
use std::env;
use std::fs::File;
use std::io::BufReader;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1) else {
        anyhow::bail!("usage: analyse_log LOG_PATH [VIEW]");
    };

    let records = parser::parse_reader(BufReader::new(File::open(path)?))?;
    let summary = stats::summarize(&records)?;
    for (label, value) in summary.iter() {
        println!("{:<28} {}", label, value);
    }

    if let Some(view) = args.get(2) {
        let rows = Projector::new().project(view, &records)?;
        println!();
        csv_writer::write_csv(&rows, &mut std::io::stdout().lock())?;
    }
    Ok(())
}
