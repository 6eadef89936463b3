//! Codec commands - generate, validate and parse accession numbers.

use std::path::PathBuf;

use chrono::{Datelike, Utc};
use colored::Colorize;
use invivodb::audit::{audit_values, read_accession_column};
use invivodb::species::by_code;
use invivodb::{
    AccessionStatus, UNKNOWN_SPECIES_CODE, generate_accession_number, parse_accession_number,
    species_code,
};

pub fn generate(
    species: Option<String>,
    scientific_name: Option<String>,
    year: Option<i32>,
    sequence: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let code = match (species, scientific_name) {
        (Some(code), _) => code.to_uppercase(),
        (None, Some(name)) => {
            let code = species_code(&name);
            if code == UNKNOWN_SPECIES_CODE {
                eprintln!(
                    "{} No species code for '{}', using {}",
                    "Warning:".yellow(),
                    name,
                    UNKNOWN_SPECIES_CODE
                );
            }
            code.to_string()
        }
        (None, None) => return Err("Must specify --species or --scientific-name".into()),
    };
    let year = year.unwrap_or_else(|| Utc::now().year());

    let accession = generate_accession_number(&code, year, sequence)?;
    println!("{}", accession);
    Ok(())
}

pub fn validate(
    accessions: Vec<String>,
    file: Option<PathBuf>,
    column: String,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut values = accessions;
    if let Some(path) = &file {
        values.extend(read_accession_column(path, &column)?);
    }
    if values.is_empty() {
        return Err("Nothing to validate: pass accession numbers or --file".into());
    }

    let (findings, stats) = audit_values(&values);

    if json_output {
        let report = serde_json::json!({
            "findings": findings,
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for finding in &findings {
            let label = match finding.status {
                AccessionStatus::Valid if !verbose && file.is_some() => continue,
                AccessionStatus::Valid => "valid".green(),
                AccessionStatus::Legacy => "legacy".yellow(),
                AccessionStatus::Invalid => "invalid".red(),
                AccessionStatus::Empty => continue,
            };
            match &finding.error {
                Some(error) => println!("{:<16} {:<8} {}", finding.value, label, error.dimmed()),
                None => println!("{:<16} {}", finding.value, label),
            }
        }
        println!();
        println!(
            "Valid: {}  Legacy: {}  Invalid: {}",
            stats.valid_count.to_string().green(),
            stats.legacy_count.to_string().yellow(),
            stats.invalid_count.to_string().red()
        );
    }

    if stats.all_valid() {
        Ok(())
    } else {
        Err(format!(
            "{} of {} accession numbers are not valid",
            stats.legacy_count + stats.invalid_count,
            findings.len() - stats.empty_count
        )
        .into())
    }
}

pub fn parse(accession: String, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let parts = parse_accession_number(accession.trim())?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&parts)?);
    } else {
        println!("{} {}", "Accession:".cyan().bold(), accession.trim().white());
        match by_code(&parts.species_code) {
            Some(entry) => println!(
                "  Species code: {} ({}, {})",
                parts.species_code, entry.common_name, entry.scientific_name
            ),
            None => println!("  Species code: {}", parts.species_code),
        }
        println!("  Year:         {}", parts.year);
        println!("  Sequence:     {}", parts.sequence);
        println!("  Checksum:     {}", parts.checksum);
    }
    Ok(())
}
