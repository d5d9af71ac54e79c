// Label normalization: the comparison form of a free-text label.
//
// Quiz and section names arrive with mixed case, stray whitespace and
// Spanish accents ("Unión Europea", "RÉGIMEN DISCIPLINARIO"). Everything the
// matcher compares goes through `normalize` first, so patterns and labels
// meet in the same uppercase, unaccented form.

use unicode_normalization::char::{decompose_canonical, is_combining_mark};

/// Normalize a label for comparison: trim, uppercase, strip diacritics.
///
/// Each character is decomposed canonically; when the decomposition carries
/// combining marks they are dropped, so Á/À/Ä/Â all become A and Ñ becomes N.
/// Characters without diacritics (Hangul syllables, compatibility signs) are
/// kept exactly as uppercased. The output is never meant for display.
pub fn normalize(label: &str) -> String {
    let upper = label.trim().to_uppercase();
    let mut stripped = String::with_capacity(upper.len());
    for c in upper.chars() {
        push_without_marks(c, &mut stripped);
    }

    // A trailing lone combining mark leaves whitespace behind once stripped
    stripped.trim().to_string()
}

fn push_without_marks(c: char, out: &mut String) {
    let mut parts = Vec::with_capacity(4);
    decompose_canonical(c, |d| parts.push(d));

    if parts.iter().any(|d| is_combining_mark(*d)) {
        out.extend(parts.into_iter().filter(|d| !is_combining_mark(*d)));
    } else {
        out.push(c);
    }
}

/// Split a normalized label into words for the fuzzy pass.
pub fn words(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}
