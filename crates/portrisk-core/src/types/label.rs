//! Case and accent folding for questionnaire labels.

/// Lowercase `s`, strip the Latin diacritics that appear in questionnaire
/// labels, and collapse runs of whitespace into a single space.
pub fn fold_label(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for c in s.trim().chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        for lower in c.to_lowercase() {
            out.push(strip_diacritic(lower));
        }
    }
    out
}

fn strip_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_strips_accents_and_case() {
        assert_eq!(fold_label("Geopolítica"), "geopolitica");
        assert_eq!(fold_label("Longo prazo (até 2035)"), "longo prazo (ate 2035)");
    }

    #[test]
    fn test_fold_collapses_whitespace() {
        assert_eq!(fold_label("  Curto   prazo\t(2026 a 2027) "), "curto prazo (2026 a 2027)");
    }
}
