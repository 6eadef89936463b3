//! Migrate command - convert legacy accession numbers to the current format.

use colored::Colorize;
use invivodb::{AnimalRegistry, InvivoConfig, MigrationOutcome};

pub fn run(
    config: InvivoConfig,
    dry_run: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = AnimalRegistry::open(config)?;
    let report = registry.plan_migration()?;

    let applied = if dry_run || report.summary.converted == 0 {
        0
    } else {
        registry.apply_migration(&report)?
    };

    if json_output {
        let output = serde_json::json!({
            "dry_run": dry_run,
            "applied": applied,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for entry in &report.entries {
            match &entry.outcome {
                MigrationOutcome::AlreadyCurrent => {}
                MigrationOutcome::Converted { new } => {
                    println!("{} {} → {}", "✓".green(), entry.original, new)
                }
                MigrationOutcome::Collision {
                    new,
                    conflicting_record_id,
                } => println!(
                    "{} Conflict: {} → {} already exists (record {})",
                    "✗".red(),
                    entry.original,
                    new,
                    conflicting_record_id
                ),
                MigrationOutcome::Unconvertible { reason } => println!(
                    "{} Could not convert {}: {}",
                    "✗".red(),
                    entry.original,
                    reason
                ),
            }
        }

        let summary = &report.summary;
        println!();
        if summary.converted == 0 && report.is_clean() {
            println!(
                "{}",
                "No migration needed - all accession numbers are already in new format".green()
            );
        } else {
            let heading = if dry_run {
                "Migration plan (dry run):"
            } else {
                "Migration completed:"
            };
            println!("{}", heading.yellow().bold());
            println!("  Already current: {}", summary.already_current);
            if dry_run {
                println!("  ✓ Would migrate: {}", summary.converted.to_string().green());
            } else {
                println!("  ✓ Successfully migrated: {}", applied.to_string().green());
            }
            println!(
                "  ✗ Errors: {}",
                (summary.collisions + summary.unconvertible).to_string().red()
            );
        }
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(format!(
            "{} records need manual attention",
            report.summary.collisions + report.summary.unconvertible
        )
        .into())
    }
}
