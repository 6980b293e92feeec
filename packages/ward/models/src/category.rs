//! Closed categorical forms of free-text drainage attributes.
//!
//! Drainage datasets record condition, pump availability, and age as free
//! text. Each attribute is mapped to a closed enum here, with an explicit
//! catch-all variant for text that matches nothing.

use strum_macros::EnumString;

/// Physical condition of a ward's drains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DrainCondition {
    Good,
    Fair,
    Poor,
    /// Empty, missing, or unrecognized condition text.
    #[strum(disabled)]
    Unrecognized,
}

impl DrainCondition {
    /// Maps raw condition text (case-insensitive, surrounding whitespace
    /// ignored) to a [`DrainCondition`].
    #[must_use]
    pub fn from_text(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse().ok())
            .unwrap_or(Self::Unrecognized)
    }
}

/// Whether a ward has a working drainage pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum PumpAvailability {
    #[strum(serialize = "yes", serialize = "true")]
    Available,
    /// Anything other than an affirmative answer, including missing text.
    #[strum(disabled)]
    Unavailable,
}

impl PumpAvailability {
    /// Maps boolean-like text (`yes`/`true`, any case) to
    /// [`PumpAvailability::Available`]; everything else is unavailable.
    #[must_use]
    pub fn from_text(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse().ok())
            .unwrap_or(Self::Unavailable)
    }
}

/// Age bracket of a ward's drainage infrastructure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeCategory {
    /// Up to ten years old (`new`, `0-5`, `5-10`).
    New,
    /// Ten to twenty years old (`moderate`, `10-20`).
    Moderate,
    /// Older than twenty years (`old`, `aging`, `20+`).
    Old,
    Unrecognized,
}

const NEW_TOKENS: &[&str] = &["new", "0-5", "5-10"];
const MODERATE_TOKENS: &[&str] = &["moderate", "10-20"];
const OLD_TOKENS: &[&str] = &["old", "aging", "ageing", "20+"];
const NEGATIONS: &[&str] = &["not", "no", "non"];

impl AgeCategory {
    /// Maps free-text age descriptions such as `"0-5 years"` or
    /// `"Moderate (10-20 yrs)"` to an [`AgeCategory`].
    ///
    /// A word counts when it contains a keyword (`"Brand-new"`,
    /// `"0-5yrs"`), unless the previous word is a negation (`"not new"`).
    /// Numeric brackets must not be flanked by other digits, so `"20-50"`
    /// does not contain `0-5`.
    #[must_use]
    pub fn from_text(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Unrecognized;
        };
        let lowered = raw.to_ascii_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '+'))
            .filter(|t| !t.is_empty())
            .collect();

        let mentions = |keywords: &[&str]| {
            tokens.iter().enumerate().any(|(i, token)| {
                keywords.iter().any(|k| contains_keyword(token, k))
                    && (i == 0 || !NEGATIONS.contains(&tokens[i - 1]))
            })
        };

        if mentions(NEW_TOKENS) {
            Self::New
        } else if mentions(MODERATE_TOKENS) {
            Self::Moderate
        } else if mentions(OLD_TOKENS) {
            Self::Old
        } else {
            Self::Unrecognized
        }
    }
}

/// Returns `true` if `keyword` occurs in `token`. Keywords starting with a
/// digit only match where they are not part of a longer number.
fn contains_keyword(token: &str, keyword: &str) -> bool {
    if !keyword.starts_with(|c: char| c.is_ascii_digit()) {
        return token.contains(keyword);
    }
    let bytes = token.as_bytes();
    token.match_indices(keyword).any(|(start, _)| {
        let end = start + keyword.len();
        let digit_before = start > 0 && bytes[start - 1].is_ascii_digit();
        let digit_after = bytes.get(end).is_some_and(u8::is_ascii_digit);
        !digit_before && !digit_after
    })
}
