//! Check command - validate every stored accession number.

use colored::Colorize;
use invivodb::{AccessionStatus, AnimalRegistry, InvivoConfig};

pub fn run(
    config: InvivoConfig,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = AnimalRegistry::open(config)?;
    let (findings, stats) = registry.check_accessions()?;

    if json_output {
        let report = serde_json::json!({
            "findings": findings,
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for finding in &findings {
            match finding.status {
                AccessionStatus::Valid if verbose => {
                    println!("{} {}", "✓".green(), finding.value)
                }
                AccessionStatus::Valid | AccessionStatus::Empty => {}
                AccessionStatus::Legacy | AccessionStatus::Invalid => println!(
                    "{} Invalid accession number: {} ({})",
                    "✗".red(),
                    finding.value,
                    finding.error.as_deref().unwrap_or("unknown error")
                ),
            }
        }

        println!();
        println!("{}", "Validation results:".yellow().bold());
        println!("  ✓ Valid:   {}", stats.valid_count.to_string().green());
        println!(
            "  ✗ Invalid: {}",
            (stats.invalid_count + stats.legacy_count).to_string().red()
        );
        if stats.legacy_count > 0 {
            println!(
                "\n{} legacy accession numbers can be converted with {}",
                stats.legacy_count,
                "invivodb migrate".cyan().bold()
            );
        }
        if !stats.by_species.is_empty() {
            println!();
            println!("{}", "By species:".yellow().bold());
            for (code, count) in &stats.by_species {
                println!("  {:<4} {}", code, count);
            }
        }
    }

    if stats.all_valid() {
        Ok(())
    } else {
        Err("Some stored accession numbers are invalid".into())
    }
}
