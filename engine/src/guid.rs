//! Pseudo-GUID generation for records that have no identifier yet.
//!
//! Identifiers are concatenated random hex groups laid out as
//! `XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX`. Nothing checks them against what
//! is already stored; collisions are accepted as negligible.

use crate::RecordId;
use rand::Rng;

/// Group lengths of a GUID, in hex digits.
const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

/// Four random lowercase hex digits.
fn s4<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{:04x}", rng.gen::<u16>())
}

/// Generate a GUID using the given random source.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> RecordId {
    let mut id = String::with_capacity(36);
    id.push_str(&s4(rng));
    id.push_str(&s4(rng));
    for _ in 0..3 {
        id.push('-');
        id.push_str(&s4(rng));
    }
    id.push('-');
    for _ in 0..3 {
        id.push_str(&s4(rng));
    }
    id
}

/// Generate a GUID from the thread-local random source.
pub fn generate() -> RecordId {
    generate_with(&mut rand::thread_rng())
}

/// Check whether `s` has the GUID layout (lowercase hex, 8-4-4-4-12).
pub fn is_guid(s: &str) -> bool {
    let groups: Vec<&str> = s.split('-').collect();
    groups.len() == GROUPS.len()
        && groups.iter().zip(GROUPS).all(|(group, len)| {
            group.len() == len
                && group
                    .bytes()
                    .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        })
}
