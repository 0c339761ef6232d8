//! Character Classes
//!
//! Digit / letter / alphanumeric predicates as the training pipeline
//! applied them. These follow Unicode general categories plus the
//! `Numeric_Type=Digit` code points, which differ from `char::is_numeric`
//! (all of `N*`) and `char::is_alphabetic` (which includes combining marks
//! and letter numbers).

use unicode_general_category::{get_general_category, GeneralCategory};

/// Non-`Nd` code points whose numeric type is Digit: superscripts,
/// subscripts, circled and parenthesized digits and a few script digits
const DIGIT_RANGES: &[(char, char)] = &[
    ('\u{00B2}', '\u{00B3}'),
    ('\u{00B9}', '\u{00B9}'),
    ('\u{1369}', '\u{1371}'),
    ('\u{19DA}', '\u{19DA}'),
    ('\u{2070}', '\u{2070}'),
    ('\u{2074}', '\u{2079}'),
    ('\u{2080}', '\u{2089}'),
    ('\u{2460}', '\u{2468}'),
    ('\u{2474}', '\u{247C}'),
    ('\u{2488}', '\u{2490}'),
    ('\u{24EA}', '\u{24EA}'),
    ('\u{24F5}', '\u{24FD}'),
    ('\u{24FF}', '\u{24FF}'),
    ('\u{2776}', '\u{277E}'),
    ('\u{2780}', '\u{2788}'),
    ('\u{278A}', '\u{2792}'),
    ('\u{10A40}', '\u{10A43}'),
    ('\u{10E60}', '\u{10E68}'),
    ('\u{11052}', '\u{1105A}'),
    ('\u{1F100}', '\u{1F10A}'),
];

fn is_letter_category(category: GeneralCategory) -> bool {
    matches!(
        category,
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Decimal digits plus the Digit-typed extras ('²' yes, '½' no)
pub fn is_digit(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_digit();
    }
    get_general_category(c) == GeneralCategory::DecimalNumber
        || DIGIT_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&c))
}

/// Letters only (`L*`); marks and letter numbers are excluded
pub fn is_alpha(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphabetic();
    }
    is_letter_category(get_general_category(c))
}

/// Letters or any number (`L*` or `N*`)
pub fn is_alnum(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphanumeric();
    }
    let category = get_general_category(c);
    is_letter_category(category)
        || matches!(
            category,
            GeneralCategory::DecimalNumber
                | GeneralCategory::LetterNumber
                | GeneralCategory::OtherNumber
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits() {
        assert!(is_digit('7'));
        assert!(is_digit('\u{0663}')); // Arabic-Indic three
        assert!(is_digit('²'));
        assert!(is_digit('\u{2460}')); // circled one
        assert!(!is_digit('½'));
        assert!(!is_digit('Ⅻ'));
        assert!(!is_digit('a'));
    }

    #[test]
    fn test_letters() {
        assert!(is_alpha('z'));
        assert!(is_alpha('ß'));
        assert!(is_alpha('ʰ')); // modifier letter
        assert!(!is_alpha('Ⅻ'));
        assert!(!is_alpha('\u{093E}')); // Devanagari vowel sign AA
        assert!(!is_alpha('5'));
    }

    #[test]
    fn test_alphanumeric() {
        assert!(is_alnum('½'));
        assert!(is_alnum('Ⅻ'));
        assert!(is_alnum('é'));
        assert!(!is_alnum('\u{093E}'));
        assert!(!is_alnum('-'));
        assert!(!is_alnum('/'));
    }
}
