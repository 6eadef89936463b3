//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use invivodb::config::DEFAULT_DATABASE;

/// invivoDB: accession numbers and records for in-vivo experiments
#[derive(Parser)]
#[command(name = "invivodb")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the SQLite database
    #[arg(long, global = true, env = "INVIVODB_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,

    /// Refuse to create animals whose species has no accession code
    #[arg(long, global = true, env = "INVIVODB_STRICT_SPECIES")]
    pub strict_species: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an accession number without storing anything
    Generate {
        /// Species code (e.g., MM, RN, MAC)
        #[arg(short, long, conflicts_with = "scientific_name")]
        species: Option<String>,

        /// Scientific name to derive the species code from
        #[arg(long)]
        scientific_name: Option<String>,

        /// Year (default: current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Sequence number (0-999999)
        #[arg(value_name = "SEQUENCE")]
        sequence: u32,
    },

    /// Validate accession numbers given as arguments or read from a file
    Validate {
        /// Accession numbers to check
        #[arg(value_name = "ACCESSION")]
        accessions: Vec<String>,

        /// CSV/TSV file to read accession numbers from
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Column holding accession numbers in --file
        #[arg(short, long, default_value = "accession_number")]
        column: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode an accession number into its fields
    Parse {
        #[arg(value_name = "ACCESSION")]
        accession: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List species and their accession codes
    Species {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create the database and seed built-in species
    Init,

    /// Register a new animal and assign its accession number
    ///
    /// Unmigrated legacy identifiers (e.g. MM-001-2025) do not reserve their
    /// sequence. Run `invivodb migrate` first, or the new animal may take the
    /// identifier a legacy record would convert to.
    AddAnimal {
        /// Species row ID
        #[arg(long, conflicts_with = "scientific_name", required_unless_present = "scientific_name")]
        species_id: Option<i64>,

        /// Species scientific name (e.g., "Mus musculus")
        #[arg(long)]
        scientific_name: Option<String>,

        /// Strain (e.g., C57BL/6)
        #[arg(long)]
        strain: Option<String>,

        /// Age at start, in weeks
        #[arg(long)]
        age: Option<f64>,

        /// Weight at start, in grams
        #[arg(long)]
        weight: Option<f64>,

        /// Sex (Male, Female, Mixed)
        #[arg(long)]
        sex: Option<String>,

        /// Genetic background notes
        #[arg(long)]
        genetic_background: Option<String>,

        /// Housing and environmental conditions
        #[arg(long)]
        housing: Option<String>,

        /// Ethics committee approval number
        #[arg(long)]
        ethical_approval: Option<String>,

        /// Issue the accession number in this year instead of the current one
        #[arg(long)]
        year: Option<i32>,
    },

    /// List stored animals
    List {
        /// Only animals of this species row ID
        #[arg(long)]
        species_id: Option<i64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate every accession number stored in the database
    Check {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert legacy dash-delimited accession numbers to the current format
    Migrate {
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,

        /// Output the migration report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the JSON HTTP API
    Serve {
        /// Port for web server
        #[arg(short, long, default_value = "3141")]
        port: u16,
    },
}
