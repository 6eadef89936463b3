//! Fuzz target for auditing an accession column read from a file.

#![no_main]

use invivodb::audit::{audit_values, read_accession_column};
use libfuzzer_sys::fuzz_target;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let mut content = b"accession_number,note\n".to_vec();
    content.extend_from_slice(data);

    if let Ok(mut temp_file) = tempfile::NamedTempFile::with_suffix(".csv") {
        if temp_file.write_all(&content).is_ok() {
            if let Ok(values) = read_accession_column(temp_file.path(), "accession_number") {
                let (findings, stats) = audit_values(&values);
                assert_eq!(findings.len(), values.len());
                assert_eq!(
                    stats.valid_count + stats.legacy_count + stats.invalid_count + stats.empty_count,
                    values.len()
                );
            }
        }
    }
});
