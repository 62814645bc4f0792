//! Participant token generation.

use rand::Rng;

/// Fixed event-year tag prefixed to every token.
pub const TOKEN_PREFIX: &str = "U16";

/// Length of the random suffix.
const SUFFIX_LEN: usize = 9;

/// URL-safe alphabet for the suffix.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Generate a participant token.
///
/// The suffix is drawn uniformly from a 64-symbol URL-safe alphabet, giving
/// a 2^54 token space. No uniqueness check is made against the store;
/// collision probability is negligible at event-scale registration volume.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    let mut token = String::with_capacity(TOKEN_PREFIX.len() + SUFFIX_LEN);
    token.push_str(TOKEN_PREFIX);
    for _ in 0..SUFFIX_LEN {
        token.push(ALPHABET[rng.gen_range(0..ALPHABET.len())] as char);
    }
    token
}
