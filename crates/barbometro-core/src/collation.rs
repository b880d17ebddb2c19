//! Portuguese-aware string ordering.
//!
//! Approximates the three-level comparison a `pt` collator performs:
//!
//! 1. base letters, ignoring case and diacritics (`"Água" ~ "agua"`),
//! 2. diacritics (`"a" < "á" < "à" < "â" < "ã"`),
//! 3. case, lowercase first, then the raw text as a final tie-break.
//!
//! The last level makes the order total, so sorting is idempotent.

use std::cmp::Ordering;

use crate::restaurant::Restaurant;

/// Compare two strings the way a Portuguese reader expects them ordered.
#[must_use]
pub fn pt_cmp(a: &str, b: &str) -> Ordering {
    let (a_base, a_marks): (Vec<char>, Vec<u8>) = a.chars().map(fold).unzip();
    let (b_base, b_marks): (Vec<char>, Vec<u8>) = b.chars().map(fold).unzip();

    a_base
        .cmp(&b_base)
        .then_with(|| a_marks.cmp(&b_marks))
        .then_with(|| case_weights(a).cmp(&case_weights(b)))
        .then_with(|| a.cmp(b))
}

/// Return a copy of `restaurants` ordered by name with [`pt_cmp`].
///
/// The sort is stable: records with identical names keep their input order.
#[must_use]
pub fn sort_by_name(restaurants: &[Restaurant]) -> Vec<Restaurant> {
    let mut sorted = restaurants.to_vec();
    sorted.sort_by(|a, b| pt_cmp(&a.name, &b.name));
    sorted
}

fn case_weights(s: &str) -> Vec<bool> {
    s.chars().map(char::is_uppercase).collect()
}

/// Split a character into its lowercase base letter and a diacritic weight.
fn fold(c: char) -> (char, u8) {
    let lower = c.to_lowercase().next().unwrap_or(c);
    match lower {
        'á' => ('a', 1),
        'à' => ('a', 2),
        'â' => ('a', 3),
        'ã' => ('a', 4),
        'ä' => ('a', 5),
        'å' => ('a', 7),
        'ç' => ('c', 6),
        'é' => ('e', 1),
        'è' => ('e', 2),
        'ê' => ('e', 3),
        'ë' => ('e', 5),
        'í' => ('i', 1),
        'ì' => ('i', 2),
        'î' => ('i', 3),
        'ï' => ('i', 5),
        'ñ' => ('n', 4),
        'ó' => ('o', 1),
        'ò' => ('o', 2),
        'ô' => ('o', 3),
        'õ' => ('o', 4),
        'ö' => ('o', 5),
        'ú' => ('u', 1),
        'ù' => ('u', 2),
        'û' => ('u', 3),
        'ü' => ('u', 5),
        'ý' => ('y', 1),
        'ÿ' => ('y', 5),
        other => (other, 0),
    }
}
