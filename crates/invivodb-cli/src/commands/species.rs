//! Species command - list the species code table.

use colored::Colorize;
use invivodb::{SPECIES_TABLE, UNKNOWN_SPECIES_CODE};

pub fn run(json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(SPECIES_TABLE)?);
        return Ok(());
    }

    println!("{}", "Species codes:".cyan().bold());
    for entry in SPECIES_TABLE {
        println!(
            "  {:<4} {:<24} {:<10} taxid {}",
            entry.code.white().bold(),
            entry.scientific_name,
            entry.common_name,
            entry.taxonomy_id
        );
    }
    println!();
    println!(
        "Any other scientific name maps to {}.",
        UNKNOWN_SPECIES_CODE.yellow()
    );
    Ok(())
}
