//! C# identifier syntax

use unic_ucd_category::GeneralCategory;

/// Reserved C# keywords; usable as member names only with a leading `@`
const RESERVED_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked", "class",
    "const", "continue", "decimal", "default", "delegate", "do", "double", "else", "enum", "event",
    "explicit", "extern", "false", "finally", "fixed", "float", "for", "foreach", "goto", "if",
    "implicit", "in", "int", "interface", "internal", "is", "lock", "long", "namespace", "new",
    "null", "object", "operator", "out", "override", "params", "private", "protected", "public",
    "readonly", "ref", "return", "sbyte", "sealed", "short", "sizeof", "stackalloc", "static",
    "string", "struct", "switch", "this", "throw", "true", "try", "typeof", "uint", "ulong",
    "unchecked", "unsafe", "ushort", "using", "virtual", "void", "volatile", "while",
];

/// Letter classes: Lu, Ll, Lt, Lm, Lo, Nl
fn is_letter_character(category: GeneralCategory) -> bool {
    matches!(
        category,
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::LetterNumber
    )
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || is_letter_character(GeneralCategory::of(c))
}

/// Letters plus Nd, Pc, Mn, Mc, Cf
fn is_identifier_part(c: char) -> bool {
    let category = GeneralCategory::of(c);
    is_letter_character(category)
        || matches!(
            category,
            GeneralCategory::DecimalNumber
                | GeneralCategory::ConnectorPunctuation
                | GeneralCategory::NonspacingMark
                | GeneralCategory::SpacingMark
                | GeneralCategory::Format
        )
}

pub fn is_reserved_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS.contains(&name)
}

/// Whether `name` can be used as a member name
///
/// A leading `@` makes the identifier verbatim, which also admits reserved
/// keywords.
pub fn is_valid_identifier(name: &str) -> bool {
    let (verbatim, body) = match name.strip_prefix('@') {
        Some(body) => (true, body),
        None => (false, name),
    };

    let mut chars = body.chars();
    let first_ok = chars.next().map(is_identifier_start).unwrap_or(false);
    if !first_ok || !chars.all(is_identifier_part) {
        return false;
    }
    verbatim || !is_reserved_keyword(body)
}

/// The name a member is known by, for uniqueness checks
///
/// `@Foo` and `Foo` declare the same member.
pub fn canonical_name(name: &str) -> &str {
    name.strip_prefix('@').unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        for name in ["Member", "_private", "x1", "Größe", "名前", "@class", "@Member", "value_2"] {
            assert!(is_valid_identifier(name), "{}", name);
        }
    }

    #[test]
    fn test_invalid_identifiers() {
        for name in ["", "@", "1abc", "has space", "dash-ed", "class", "quote\"", "@@x", "a.b"] {
            assert!(!is_valid_identifier(name), "{:?}", name);
        }
    }

    #[test]
    fn test_unicode_part_categories() {
        // combining acute, undertie, zero-width joiner, Devanagari vowel sign, roman numeral
        for name in ["Cafe\u{301}", "a\u{203F}b", "a\u{200D}b", "\u{915}\u{93E}", "\u{216B}x"] {
            assert!(is_valid_identifier(name), "{:?}", name);
        }
    }

    #[test]
    fn test_marks_and_digits_cannot_start() {
        for name in ["\u{301}a", "\u{200D}a", "\u{663}x", "a\u{1F600}"] {
            assert!(!is_valid_identifier(name), "{:?}", name);
        }
    }

    #[test]
    fn test_contextual_keywords_are_identifiers() {
        for name in ["var", "async", "record", "value"] {
            assert!(is_valid_identifier(name), "{}", name);
        }
    }

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("@Foo"), "Foo");
        assert_eq!(canonical_name("Foo"), "Foo");
    }
}
