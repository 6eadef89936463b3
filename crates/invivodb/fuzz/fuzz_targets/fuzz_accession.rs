//! Fuzz target for the accession-number decoder.
//!
//! Checks that validation, parsing and legacy conversion never panic and
//! that `validate` and `parse` always agree.

#![no_main]

use invivodb::{
    LegacyAccession, parse_accession_number, validate_accession_number,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);

    let valid = validate_accession_number(&input);
    let parsed = parse_accession_number(&input);
    assert_eq!(valid, parsed.is_ok());

    if let Ok(parts) = parsed {
        assert_eq!(input.len(), parts.species_code.len() + 12);
    }

    if let Ok(legacy) = input.parse::<LegacyAccession>() {
        // Conversion may fail on range, but must not panic.
        let _ = legacy.to_current();
    }
});
