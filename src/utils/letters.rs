use rand::Rng;

/// Alphabet used to fill grid cells no word claimed
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Draw a filler letter uniformly from the alphabet
pub fn random_letter(rng: &mut impl Rng) -> char {
    let idx = rng.random_range(0..ALPHABET.len());
    ALPHABET[idx] as char
}
