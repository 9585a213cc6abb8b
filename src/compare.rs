/// Compares a stored word against a query.
///
/// `stored` must include the word's NUL terminator. The words are equal when
/// the terminator sits exactly at `query.len()` and every byte pair agrees
/// once bits 0x20 and 0x80 are ignored. Masking with 0x5F folds ASCII case
/// but keeps bit 0x40, so an apostrophe (0x27) never equals `g` (0x67).
pub fn words_match(stored: &[u8], query: &[u8]) -> bool {
    if stored.get(query.len()) != Some(&0) {
        return false;
    }
    stored
        .iter()
        .zip(query)
        .all(|(s, q)| (s ^ q) & 0x5F == 0)
}
