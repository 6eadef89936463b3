//! Two-character check code for accession numbers.
//!
//! The check code is ISO/IEC 7064 MOD 1271-36 (pure system, two check
//! characters). Every character of the identifier, check characters
//! included, is read as a base-36 digit over [`ALPHABET`]; a correct
//! identifier is congruent to 1 modulo 1271.
//!
//! Because 1271 is coprime to 36 and larger than any digit difference, any
//! single-character substitution changes the residue. Adjacent
//! transpositions of digits are caught as well.
//!
//! Changing this algorithm invalidates every accession number already
//! issued.

/// Symbols allowed in the check field, in value order.
pub const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

const MODULUS: u32 = 1271;
const RADIX: u32 = 36;

/// Value of a single symbol, or `None` if it is outside [`ALPHABET`].
fn symbol_value(byte: u8) -> Option<u32> {
    match byte {
        b'0'..=b'9' => Some(u32::from(byte - b'0')),
        b'A'..=b'Z' => Some(u32::from(byte - b'A') + 10),
        _ => None,
    }
}

/// Whether `byte` may appear in the check field.
pub fn is_check_symbol(byte: u8) -> bool {
    symbol_value(byte).is_some()
}

/// Residue of `data` read as a base-36 number, modulo 1271.
fn residue(data: &str) -> Option<u32> {
    data.bytes().try_fold(0u32, |acc, byte| {
        symbol_value(byte).map(|value| (acc * RADIX + value) % MODULUS)
    })
}

/// Compute the two check characters for an identifying prefix
/// (`species_code + year + sequence`).
///
/// Returns `None` if the prefix contains a symbol outside [`ALPHABET`].
pub fn compute(prefix: &str) -> Option<String> {
    let shifted = residue(prefix)? * RADIX % MODULUS * RADIX % MODULUS;
    let check = (MODULUS + 1 - shifted) % MODULUS;

    let high = ALPHABET[(check / RADIX) as usize];
    let low = ALPHABET[(check % RADIX) as usize];
    Some([high as char, low as char].iter().collect())
}

/// Whether a complete identifier (prefix plus check characters) carries the
/// check characters [`compute`] assigns to its prefix.
///
/// A residue of 1 alone is not enough: check values 1271-1295 alias valid
/// ones and are never emitted.
pub fn verify(full: &str) -> bool {
    let split = match full.len().checked_sub(2) {
        Some(n) if n > 0 && full.is_char_boundary(n) => n,
        _ => return false,
    };
    let (prefix, check) = full.split_at(split);
    compute(prefix).as_deref() == Some(check)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_answers() {
        assert_eq!(compute("MM2025000001").as_deref(), Some("1Y"));
        assert_eq!(compute("RN2025000042").as_deref(), Some("6G"));
        assert_eq!(compute("MAC2025000123").as_deref(), Some("YE"));
        assert_eq!(compute("MM2024000001").as_deref(), Some("DU"));
    }

    #[test]
    fn test_deterministic() {
        let first = compute("CAN2025000001");
        let second = compute("CAN2025000001");
        assert_eq!(first, second);
        assert_eq!(first.as_deref(), Some("UK"));
    }

    #[test]
    fn test_output_uses_alphabet() {
        for sequence in 0..500u32 {
            let prefix = format!("RN2025{sequence:06}");
            let check = compute(&prefix).unwrap();
            assert_eq!(check.len(), 2);
            assert!(check.bytes().all(is_check_symbol), "bad symbol in {check}");
        }
    }

    #[test]
    fn test_rejects_foreign_symbols() {
        assert_eq!(compute("mm2025000001"), None);
        assert_eq!(compute("MM-001-2024"), None);
        assert!(!is_check_symbol(b'a'));
        assert!(!is_check_symbol(b'-'));
    }

    #[test]
    fn test_verify_matches_compute() {
        let prefix = "MAC2025000123";
        let full = format!("{prefix}{}", compute(prefix).unwrap());
        assert!(verify(&full));
        assert!(!verify("MAC2025000123ZZ"));
        assert!(!verify(""));
        assert!(!verify("MM2025000001\u{00e9}"));
    }

    #[test]
    fn test_verify_rejects_aliased_check_value() {
        // 0K is assigned; ZV has the same residue but is out of range.
        assert!(verify("MM20250000030K"));
        assert_eq!(residue("MM2025000003ZV"), Some(1));
        assert!(!verify("MM2025000003ZV"));
    }

    #[test]
    fn test_adjacent_digit_transpositions_detected() {
        let prefix = "MM2025001234";
        let full = format!("{prefix}{}", compute(prefix).unwrap());
        let bytes = full.as_bytes();

        for i in 2..11 {
            if bytes[i] == bytes[i + 1] {
                continue;
            }
            let mut swapped = bytes.to_vec();
            swapped.swap(i, i + 1);
            let swapped = String::from_utf8(swapped).unwrap();
            assert!(!verify(&swapped), "transposition at {i} undetected: {swapped}");
        }
    }
}
