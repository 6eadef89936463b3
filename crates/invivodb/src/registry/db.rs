use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result as SqlResult, Row, params};

use super::models::{Animal, NewAnimal, Species};
use crate::species::SPECIES_TABLE;

pub(super) const ANIMAL_COLUMNS: &str = "id, accession_number, species_id, strain, age_at_start,
    weight_at_start, sex, genetic_background, housing_conditions, ethical_approval,
    created_at, updated_at";

pub(super) const SPECIES_COLUMNS: &str = "id, common_name, scientific_name, taxonomy_id";

/// Create the species and animals tables if they do not exist.
pub(super) fn init_db(conn: &Connection) -> SqlResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS species (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            common_name     TEXT NOT NULL,
            scientific_name TEXT NOT NULL UNIQUE,
            taxonomy_id     TEXT
        );
        CREATE TABLE IF NOT EXISTS animals (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            accession_number    TEXT NOT NULL UNIQUE,
            species_id          INTEGER NOT NULL REFERENCES species(id),
            strain              TEXT,
            age_at_start        REAL,
            weight_at_start     REAL,
            sex                 TEXT,
            genetic_background  TEXT,
            housing_conditions  TEXT,
            ethical_approval    TEXT,
            created_at          TEXT NOT NULL,
            updated_at          TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_animals_species ON animals(species_id);",
    )
}

/// Seed the built-in species (idempotent via INSERT OR IGNORE).
/// Returns the number of newly inserted rows.
pub(super) fn seed_species(conn: &Connection) -> SqlResult<usize> {
    let mut count = 0usize;
    for entry in SPECIES_TABLE {
        count += conn.execute(
            "INSERT OR IGNORE INTO species (common_name, scientific_name, taxonomy_id)
             VALUES (?1, ?2, ?3)",
            params![
                entry.common_name,
                entry.scientific_name,
                entry.taxonomy_id.to_string()
            ],
        )?;
    }
    Ok(count)
}

/// Insert an animal row. Returns the new row ID.
pub(super) fn insert_animal(
    conn: &Connection,
    accession_number: &str,
    new: &NewAnimal,
    now: DateTime<Utc>,
) -> SqlResult<i64> {
    conn.execute(
        "INSERT INTO animals
            (accession_number, species_id, strain, age_at_start, weight_at_start, sex,
             genetic_background, housing_conditions, ethical_approval, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
        params![
            accession_number,
            new.species_id,
            new.strain,
            new.age_at_start,
            new.weight_at_start,
            new.sex,
            new.genetic_background,
            new.housing_conditions,
            new.ethical_approval,
            now,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub(super) fn row_to_species(row: &Row) -> SqlResult<Species> {
    Ok(Species {
        id: row.get(0)?,
        common_name: row.get(1)?,
        scientific_name: row.get(2)?,
        taxonomy_id: row.get(3)?,
    })
}

pub(super) fn row_to_animal(row: &Row) -> SqlResult<Animal> {
    Ok(Animal {
        id: row.get(0)?,
        accession_number: row.get(1)?,
        species_id: row.get(2)?,
        strain: row.get(3)?,
        age_at_start: row.get(4)?,
        weight_at_start: row.get(5)?,
        sex: row.get(6)?,
        genetic_background: row.get(7)?,
        housing_conditions: row.get(8)?,
        ethical_approval: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_and_seed() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();

        let count = seed_species(&conn).unwrap();
        assert_eq!(count, SPECIES_TABLE.len());

        // Idempotent
        init_db(&conn).unwrap();
        assert_eq!(seed_species(&conn).unwrap(), 0);
    }
}
