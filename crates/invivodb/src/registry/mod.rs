//! SQLite-backed store for species and animal records.
//!
//! The registry is the record-creation workflow around the accession codec:
//! it derives the species code from the species' scientific name, finds the
//! next sequence for that species and year, and inserts the new animal. The
//! lookup and the insert run in one IMMEDIATE transaction, and the
//! `accession_number` column is UNIQUE, so concurrent creators cannot be
//! handed the same sequence.
//!
//! # Example
//!
//! ```
//! use invivodb::registry::{AnimalRegistry, NewAnimal};
//! use invivodb::InvivoConfig;
//!
//! let config = InvivoConfig::new().with_year(Some(2025));
//! let mut registry = AnimalRegistry::open_in_memory(config)?;
//!
//! let mouse = registry.find_species_by_name("Mus musculus")?.unwrap();
//! let animal = registry.create_animal(&NewAnimal::new(mouse.id))?;
//! assert_eq!(animal.accession_number, "MM20250000011Y");
//! # Ok::<(), invivodb::InvivoError>(())
//! ```

mod db;
mod models;

pub use models::{Animal, NewAnimal, NewSpecies, Species};

use std::time::Duration;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};
use tracing::{debug, info, warn};

use crate::accession::{
    AccessionNumber, MAX_SEQUENCE, generate_accession_number, parse_accession_number,
};
use crate::audit::{AuditFinding, AuditStats, audit_values};
use crate::config::InvivoConfig;
use crate::error::{InvivoError, Result};
use crate::legacy::LegacyAccession;
use crate::migration::{MigrationReport, StoredAccession, plan_migration};
use crate::species::{UNKNOWN_SPECIES_CODE, species_code};

use db::{ANIMAL_COLUMNS, SPECIES_COLUMNS, row_to_animal, row_to_species};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Species and animal records.
pub struct AnimalRegistry {
    conn: Connection,
    config: InvivoConfig,
}

impl AnimalRegistry {
    /// Open (creating if needed) the database at `config.database_path`.
    pub fn open(config: InvivoConfig) -> Result<Self> {
        config.validate()?;
        debug!(path = %config.database_path.display(), "opening registry");
        let conn = Connection::open(&config.database_path)?;
        Self::from_connection(conn, config)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory(config: InvivoConfig) -> Result<Self> {
        config.validate()?;
        Self::from_connection(Connection::open_in_memory()?, config)
    }

    fn from_connection(conn: Connection, config: InvivoConfig) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        db::init_db(&conn)?;
        let seeded = db::seed_species(&conn)?;
        if seeded > 0 {
            info!(seeded, "seeded built-in species");
        }
        Ok(Self { conn, config })
    }

    pub fn config(&self) -> &InvivoConfig {
        &self.config
    }

    // ---------------------------------------------------------------------
    // Species
    // ---------------------------------------------------------------------

    pub fn list_species(&self) -> Result<Vec<Species>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SPECIES_COLUMNS} FROM species ORDER BY common_name"
        ))?;
        let rows = stmt.query_map([], row_to_species)?;
        let mut species = Vec::new();
        for row in rows {
            species.push(row?);
        }
        Ok(species)
    }

    pub fn get_species(&self, id: i64) -> Result<Option<Species>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {SPECIES_COLUMNS} FROM species WHERE id = ?1"),
                params![id],
                row_to_species,
            )
            .optional()?)
    }

    pub fn find_species_by_name(&self, scientific_name: &str) -> Result<Option<Species>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {SPECIES_COLUMNS} FROM species WHERE scientific_name = ?1"),
                params![scientific_name.trim()],
                row_to_species,
            )
            .optional()?)
    }

    /// Add a species. Species outside the built-in code table are accepted;
    /// their animals get the "UNK" prefix unless strict mode is on.
    pub fn add_species(&self, new: &NewSpecies) -> Result<Species> {
        self.conn.execute(
            "INSERT INTO species (common_name, scientific_name, taxonomy_id) VALUES (?1, ?2, ?3)",
            params![new.common_name, new.scientific_name.trim(), new.taxonomy_id],
        )?;
        let id = self.conn.last_insert_rowid();
        if species_code(&new.scientific_name) == UNKNOWN_SPECIES_CODE {
            warn!(
                scientific_name = %new.scientific_name,
                "species has no accession code; animals will use the UNK prefix"
            );
        }
        self.get_species(id)?
            .ok_or_else(|| InvivoError::NotFound(format!("species {id}")))
    }

    // ---------------------------------------------------------------------
    // Animals
    // ---------------------------------------------------------------------

    /// Next free sequence for a species code and year, read outside any
    /// write transaction. Only use this for display; [`Self::create_animal`]
    /// recomputes it atomically.
    pub fn next_sequence(&self, species_code: &str, year: i32) -> Result<u32> {
        next_sequence_in(&self.conn, species_code, year)
    }

    /// Create an animal, assigning it the next accession number for its
    /// species in the configured year.
    pub fn create_animal(&mut self, new: &NewAnimal) -> Result<Animal> {
        let year = self.config.current_year();
        let strict = self.config.strict_species;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let species = tx
            .query_row(
                &format!("SELECT {SPECIES_COLUMNS} FROM species WHERE id = ?1"),
                params![new.species_id],
                row_to_species,
            )
            .optional()?
            .ok_or_else(|| InvivoError::NotFound(format!("species {}", new.species_id)))?;

        let code = species.code();
        if code == UNKNOWN_SPECIES_CODE {
            if strict {
                return Err(InvivoError::UnknownSpecies(species.scientific_name));
            }
            warn!(
                scientific_name = %species.scientific_name,
                "no species code assigned; using {UNKNOWN_SPECIES_CODE}"
            );
        }

        let sequence = next_sequence_in(&tx, code, year)?;
        let accession = generate_accession_number(code, year, sequence)?;

        let claimants = legacy_claimants_in(&tx, &accession)?;
        if !claimants.is_empty() {
            warn!(
                %accession,
                ?claimants,
                "identifier is also the conversion target of unmigrated legacy records"
            );
        }

        let id = db::insert_animal(&tx, accession.as_str(), new, Utc::now())?;
        tx.commit()?;

        info!(%accession, id, "created animal");
        self.get_animal(id)?
            .ok_or_else(|| InvivoError::NotFound(format!("animal {id}")))
    }

    /// Insert an animal carrying an existing identifier, stored verbatim.
    ///
    /// Used when importing records from an older system; the identifier may
    /// be in the legacy format and is not validated here.
    pub fn import_animal(&mut self, accession_number: &str, new: &NewAnimal) -> Result<Animal> {
        let id = db::insert_animal(&self.conn, accession_number, new, Utc::now())?;
        debug!(accession_number, id, "imported animal");
        self.get_animal(id)?
            .ok_or_else(|| InvivoError::NotFound(format!("animal {id}")))
    }

    pub fn get_animal(&self, id: i64) -> Result<Option<Animal>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {ANIMAL_COLUMNS} FROM animals WHERE id = ?1"),
                params![id],
                row_to_animal,
            )
            .optional()?)
    }

    pub fn find_by_accession(&self, accession: &AccessionNumber) -> Result<Option<Animal>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {ANIMAL_COLUMNS} FROM animals WHERE accession_number = ?1"),
                params![accession.as_str()],
                row_to_animal,
            )
            .optional()?)
    }

    /// All animals, oldest first, optionally restricted to one species.
    pub fn list_animals(&self, species_id: Option<i64>) -> Result<Vec<Animal>> {
        let mut animals = Vec::new();
        match species_id {
            Some(species_id) => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {ANIMAL_COLUMNS} FROM animals WHERE species_id = ?1 ORDER BY id"
                ))?;
                for row in stmt.query_map(params![species_id], row_to_animal)? {
                    animals.push(row?);
                }
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("SELECT {ANIMAL_COLUMNS} FROM animals ORDER BY id"))?;
                for row in stmt.query_map([], row_to_animal)? {
                    animals.push(row?);
                }
            }
        }
        Ok(animals)
    }

    // ---------------------------------------------------------------------
    // Validation and migration
    // ---------------------------------------------------------------------

    /// Every stored identifier with its record ID.
    pub fn stored_accessions(&self) -> Result<Vec<StoredAccession>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, accession_number FROM animals ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(StoredAccession {
                record_id: row.get(0)?,
                accession_number: row.get(1)?,
            })
        })?;
        let mut stored = Vec::new();
        for row in rows {
            stored.push(row?);
        }
        Ok(stored)
    }

    /// IDs of records whose legacy identifier converts to `accession`.
    ///
    /// Sequence assignment only considers fixed-width identifiers, so any
    /// record returned here will collide with `accession` on migration.
    pub fn legacy_claimants(&self, accession: &AccessionNumber) -> Result<Vec<i64>> {
        legacy_claimants_in(&self.conn, accession)
    }

    /// Validate every stored identifier.
    pub fn check_accessions(&self) -> Result<(Vec<AuditFinding>, AuditStats)> {
        let stored = self.stored_accessions()?;
        Ok(audit_values(stored.iter().map(|s| &s.accession_number)))
    }

    /// Plan conversion of all legacy identifiers.
    pub fn plan_migration(&self) -> Result<MigrationReport> {
        let report = plan_migration(&self.stored_accessions()?);
        debug!(summary = ?report.summary, "planned migration");
        Ok(report)
    }

    /// Rewrite every `Converted` entry of `report` in a single transaction.
    /// Collisions and unconvertible records are left untouched, and so is any
    /// record whose stored identifier no longer matches the plan.
    ///
    /// Returns the number of records rewritten.
    pub fn apply_migration(&mut self, report: &MigrationReport) -> Result<usize> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let now = Utc::now();
        let mut updated = 0usize;

        for (record_id, original, new) in report.conversions() {
            let changed = tx.execute(
                "UPDATE animals SET accession_number = ?1, updated_at = ?2
                 WHERE id = ?3 AND accession_number = ?4",
                params![new.as_str(), now, record_id, original],
            )?;
            if changed == 0 {
                warn!(record_id, original, "record changed since planning; skipped");
                continue;
            }
            updated += changed;
            debug!(record_id, %new, "converted accession number");
        }
        tx.commit()?;

        for problem in report.problems() {
            warn!(
                record_id = problem.record_id,
                original = %problem.original,
                "left unconverted: {:?}",
                problem.outcome
            );
        }
        info!(updated, "applied migration");
        Ok(updated)
    }
}

fn legacy_claimants_in(conn: &Connection, accession: &AccessionNumber) -> Result<Vec<i64>> {
    let pattern = format!("{}-%-{}", accession.species_code(), accession.year());
    let mut stmt =
        conn.prepare("SELECT id, accession_number FROM animals WHERE accession_number LIKE ?1")?;
    let rows = stmt.query_map(params![pattern], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut claimants = Vec::new();
    for row in rows {
        let (id, value) = row?;
        let converts_to = value
            .parse::<LegacyAccession>()
            .ok()
            .and_then(|legacy| legacy.to_current().ok());
        if converts_to.as_ref() == Some(accession) {
            claimants.push(id);
        }
    }
    Ok(claimants)
}

/// Largest sequence in use for `species_code` and `year`, plus one.
///
/// Candidates are narrowed with a prefix match, but every one is decoded
/// and its fields compared; the sequence never comes from slicing strings.
fn next_sequence_in(conn: &Connection, species_code: &str, year: i32) -> Result<u32> {
    let mut stmt =
        conn.prepare("SELECT accession_number FROM animals WHERE accession_number LIKE ?1")?;
    let rows = stmt.query_map(params![format!("{species_code}{year}%")], |row| {
        row.get::<_, String>(0)
    })?;

    let mut highest: Option<u32> = None;
    for row in rows {
        let value = row?;
        if let Ok(parts) = parse_accession_number(&value) {
            if parts.species_code == species_code && parts.year == year {
                highest = Some(highest.map_or(parts.sequence, |h| h.max(parts.sequence)));
            }
        }
    }

    match highest {
        None => Ok(1),
        Some(h) if h >= MAX_SEQUENCE => Err(InvivoError::SequenceExhausted {
            species_code: species_code.to_string(),
            year,
        }),
        Some(h) => Ok(h + 1),
    }
}
