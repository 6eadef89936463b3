//! invivoDB CLI - accession numbers and animal records.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use invivodb::InvivoConfig;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose {
        "invivodb=debug,invivodb_cli=debug,tower_http=debug"
    } else {
        "invivodb=warn,invivodb_cli=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = InvivoConfig::new()
        .with_database(cli.database)
        .with_strict_species(cli.strict_species);

    let result = match cli.command {
        Commands::Generate {
            species,
            scientific_name,
            year,
            sequence,
        } => commands::codec::generate(species, scientific_name, year, sequence),

        Commands::Validate {
            accessions,
            file,
            column,
            json,
        } => commands::codec::validate(accessions, file, column, json, cli.verbose),

        Commands::Parse { accession, json } => commands::codec::parse(accession, json),

        Commands::Species { json } => commands::species::run(json),

        Commands::Init => commands::animals::init(config),

        Commands::AddAnimal {
            species_id,
            scientific_name,
            strain,
            age,
            weight,
            sex,
            genetic_background,
            housing,
            ethical_approval,
            year,
        } => {
            let new = invivodb::NewAnimal {
                species_id: 0,
                strain,
                age_at_start: age,
                weight_at_start: weight,
                sex,
                genetic_background,
                housing_conditions: housing,
                ethical_approval,
            };
            commands::animals::add(config.with_year(year), species_id, scientific_name, new)
        }

        Commands::List { species_id, json } => commands::animals::list(config, species_id, json),

        Commands::Check { json } => commands::check::run(config, json, cli.verbose),

        Commands::Migrate { dry_run, json } => commands::migrate::run(config, dry_run, json),

        Commands::Serve { port } => commands::serve::run(config, port),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
