//! Corpus flattening tool.
//!
//! Reads the nested books/chapters/verses document and writes the flat
//! `[{reference, text}]` array the server loads.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin preprocess -- [bible_data.json] [processed_bible_data.json]
//! ```

use anyhow::Context;

use verse_agent::corpus::preprocess::{flatten, load_raw, save_processed};

const DATA_FILE: &str = "bible_data.json";
const PROCESSED_FILE: &str = "processed_bible_data.json";

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let input = args.next().unwrap_or_else(|| DATA_FILE.to_string());
    let output = args.next().unwrap_or_else(|| PROCESSED_FILE.to_string());

    println!("Loading raw data from {}...", input);
    let raw = load_raw(&input).with_context(|| format!("loading {}", input))?;

    println!("Preprocessing data...");
    let records = flatten(&raw);
    println!("Total verses processed: {}", records.len());

    println!("Saving processed data to {}...", output);
    save_processed(&records, &output).with_context(|| format!("saving {}", output))?;
    println!("Preprocessing complete.");

    Ok(())
}
