// File: src/fuzzy/distance.rs

/// Levenshtein distance counted in `char`s.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let temp = row[j + 1];
            let cost = usize::from(ca != cb);
            row[j + 1] = (row[j + 1] + 1).min(row[j] + 1).min(prev + cost);
            prev = temp;
        }
    }
    row[b.len()]
}

/// Guards against fuzzy matches that are technically close but wrong.
///
/// - The first letter must match exactly, diacritics included.
/// - For tokens of four or more letters a differing second letter is only
///   accepted at distance 0.
/// - A key that contains the token, or is contained in it, is rejected when
///   the lengths differ by more than one ("ord-i-ord" matches).
pub fn fuzzy_allowed(candidate: &str, token: &str, distance: usize) -> bool {
    let cand: Vec<char> = candidate.chars().collect();
    let tok: Vec<char> = token.chars().collect();
    if cand.is_empty() || tok.is_empty() {
        return false;
    }
    if cand[0] != tok[0] {
        return false;
    }
    if tok.len() >= 4 && cand.len() >= 2 && cand[1] != tok[1] {
        return distance == 0;
    }
    let nested = candidate.contains(token) || token.contains(candidate);
    !(nested && cand.len().abs_diff(tok.len()) > 1)
}
