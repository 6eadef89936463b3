//! Integration tests for invivoDB: file audits and the record registry.

use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

use invivodb::audit::{audit_values, read_accession_column};
use invivodb::migration::MigrationOutcome;
use invivodb::{AccessionStatus, AnimalRegistry, InvivoConfig, InvivoError, NewAnimal};

/// Helper to create a temporary file with given content and suffix.
fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(suffix).expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

// =============================================================================
// File audits
// =============================================================================

#[test]
fn test_audit_csv_column() {
    let content = "animal,accession_number,strain\n\
                   a1,MM20250000011Y,C57BL/6\n\
                   a2,MM-002-2024,BALB/c\n\
                   a3,RN20250000426G,Wistar\n\
                   a4,,Wistar\n";
    let file = create_test_file(content, ".csv");

    let values = read_accession_column(file.path(), "accession_number").unwrap();
    assert_eq!(values.len(), 4);

    let (findings, stats) = audit_values(&values);
    assert_eq!(findings[0].status, AccessionStatus::Valid);
    assert_eq!(findings[1].status, AccessionStatus::Legacy);
    assert_eq!(stats.valid_count, 2);
    assert_eq!(stats.legacy_count, 1);
    assert_eq!(stats.empty_count, 1);
    assert!(!stats.all_valid());
}

#[test]
fn test_audit_tsv_column() {
    let content = "id\tacc\n1\tMAC2025000123YE\n2\tCAN2025000001UK\n";
    let file = create_test_file(content, ".tsv");

    let values = read_accession_column(file.path(), "acc").unwrap();
    assert_eq!(values, vec!["MAC2025000123YE", "CAN2025000001UK"]);

    let (_, stats) = audit_values(&values);
    assert!(stats.all_valid());
    assert_eq!(stats.by_species.get("MAC"), Some(&1));
    assert_eq!(stats.by_species.get("CAN"), Some(&1));
}

#[test]
fn test_missing_column() {
    let file = create_test_file("id,name\n1,x\n", ".csv");
    let err = read_accession_column(file.path(), "accession_number").unwrap_err();
    assert!(matches!(err, InvivoError::MissingColumn { ref column, .. } if column == "accession_number"));
}

#[test]
fn test_missing_file() {
    let err = read_accession_column("/nonexistent/animals.csv", "accession_number").unwrap_err();
    assert!(matches!(err, InvivoError::Io { .. }));
}

// =============================================================================
// Registry lifecycle
// =============================================================================

#[test]
fn test_registry_lifecycle_on_disk() {
    let dir = TempDir::new().unwrap();
    let config = InvivoConfig::new()
        .with_database(dir.path().join("animals.db"))
        .with_year(Some(2025));

    {
        let mut registry = AnimalRegistry::open(config.clone()).unwrap();
        let mouse = registry.find_species_by_name("Mus musculus").unwrap().unwrap();

        let first = registry.create_animal(&NewAnimal::new(mouse.id)).unwrap();
        let second = registry.create_animal(&NewAnimal::new(mouse.id)).unwrap();
        assert_eq!(first.accession_number, "MM20250000011Y");
        assert_eq!(second.accession_number, "MM202500000219");
    }

    let mut registry = AnimalRegistry::open(config).unwrap();
    let mouse = registry.find_species_by_name("Mus musculus").unwrap().unwrap();
    let third = registry.create_animal(&NewAnimal::new(mouse.id)).unwrap();
    assert_eq!(third.accession_number, "MM20250000030K");

    let (_, stats) = registry.check_accessions().unwrap();
    assert_eq!(stats.valid_count, 3);
    assert!(stats.all_valid());
}

#[test]
fn test_legacy_import_then_migrate() {
    let config = InvivoConfig::new().with_year(Some(2025));
    let mut registry = AnimalRegistry::open_in_memory(config).unwrap();
    let rat = registry.find_species_by_name("Rattus norvegicus").unwrap().unwrap();

    registry
        .import_animal("RN-001-2024", &NewAnimal::new(rat.id))
        .unwrap();
    registry
        .import_animal("RN-7-2024", &NewAnimal::new(rat.id))
        .unwrap();

    let (_, stats) = registry.check_accessions().unwrap();
    assert_eq!(stats.legacy_count, 2);

    let report = registry.plan_migration().unwrap();
    assert!(report.is_clean());
    assert_eq!(report.summary.converted, 2);
    assert!(report.entries.iter().any(|e| matches!(
        &e.outcome,
        MigrationOutcome::Converted { new } if new == "RN2024000001D4"
    )));

    let updated = registry.apply_migration(&report).unwrap();
    assert_eq!(updated, 2);

    let (_, stats) = registry.check_accessions().unwrap();
    assert!(stats.all_valid());

    // Next 2024 rat continues after the migrated sequence 7.
    assert_eq!(registry.next_sequence("RN", 2024).unwrap(), 8);
}

#[test]
fn test_concurrent_creation_assigns_distinct_sequences() {
    const WORKERS: usize = 4;
    const PER_WORKER: usize = 25;

    let dir = TempDir::new().unwrap();
    let config = InvivoConfig::new()
        .with_database(dir.path().join("shared.db"))
        .with_year(Some(2025));

    // Create the schema once so workers only contend on inserts.
    let mouse = AnimalRegistry::open(config.clone())
        .unwrap()
        .find_species_by_name("Mus musculus")
        .unwrap()
        .unwrap()
        .id;

    let handles: Vec<_> = (0..WORKERS)
        .map(|_| {
            let config = config.clone();
            std::thread::spawn(move || {
                let mut registry = AnimalRegistry::open(config).unwrap();
                (0..PER_WORKER)
                    .map(|_| {
                        registry
                            .create_animal(&NewAnimal::new(mouse))
                            .map(|animal| animal.accession().unwrap().sequence())
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut sequences = Vec::new();
    for handle in handles {
        for result in handle.join().unwrap() {
            sequences.push(result.expect("concurrent create failed"));
        }
    }

    sequences.sort_unstable();
    let expected: Vec<u32> = (1..=(WORKERS * PER_WORKER) as u32).collect();
    assert_eq!(sequences, expected);
}
