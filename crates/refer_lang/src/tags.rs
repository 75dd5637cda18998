//! Gendered tag pair detection.
//!
//! Gendered wording is encoded as pairs of adjacent tags of the form
//! `{<gender><tokenIndex>.<text>}`, e.g. `{F0.She}{M0.He}`, where the gender marker is `F`,
//! `M` or `U` and the token index ties the pair to a positional token.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Any tag-shaped span, gendered or not.
    pub(crate) static ref SINGLE_TAG: Regex = Regex::new(r"\{[^}]+\}").unwrap();

    /// A regular (non-gendered) template tag: `{<tokenIndex>.<text>}`.
    pub(crate) static ref SINGLE_REGULAR_TAG: Regex =
        Regex::new(r"\{([0-9]+)\.([^}]+)\}").unwrap();

    /// Two adjacent gendered tags, greedily swallowing any further chained tags.
    static ref GENDERED_TAG_PAIR: Regex = Regex::new(
        r"(?x)
        \{([FMU])([0-9]+)\.([^}]+)\}
        \s*
        \{([FMU])([0-9]+)\.([^}]+)\}
        (?:\s*\{[FMU][0-9]+\.[^}]+\})*"
    )
    .unwrap();

    /// Exactly two adjacent gendered tags; used to re-verify candidates with chained tags.
    static ref STRICT_TAG_PAIR: Regex = Regex::new(
        r"(?i)\{[FMU][0-9]+\.[^}]+\}\s*\{[FMU][0-9]+\.[^}]+\}"
    )
    .unwrap();
}

/// The gender marker carried by one tag of a pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
    /// Used for lists of Sims that are not all the same gender; never substitutable.
    Unknown,
}

impl Gender {
    fn from_marker(marker: &str) -> Gender {
        match marker {
            "F" => Gender::Female,
            "M" => Gender::Male,
            _ => Gender::Unknown,
        }
    }

    /// The single-character marker this gender is written as inside a tag.
    pub fn marker(&self) -> char {
        match self {
            Gender::Female => 'F',
            Gender::Male => 'M',
            Gender::Unknown => 'U',
        }
    }
}

/// One eligible gendered tag pair found in a string.
#[derive(Debug, Clone, PartialEq)]
pub struct GenderTagMatch {
    pub first_gender: Gender,
    pub first_token_index: u32,
    pub first_text: String,
    pub second_gender: Gender,
    pub second_token_index: u32,
    pub second_text: String,
    /// byte offset of the start of the matched span
    pub start: usize,
    /// byte offset one past the end of the matched span
    pub end: usize,
}

impl GenderTagMatch {
    /// The token index both tags of the pair reference.
    pub fn token_index(&self) -> u32 {
        self.first_token_index
    }

    /// The pair's texts ordered as `(female, male)`.
    pub fn female_male_texts(&self) -> (&str, &str) {
        if self.first_gender == Gender::Female {
            (&self.first_text, &self.second_text)
        } else {
            (&self.second_text, &self.first_text)
        }
    }
}

/// Scan text for eligible gendered tag pairs.
///
/// Returns whether at least one eligible pair was found, and the pairs in document order.
/// A pair is eligible when both tags reference the same token index, neither gender marker
/// is `U`, the two genders differ, and the two texts differ case-insensitively. Candidates
/// that greedily swallowed three or more chained tags are re-verified against a strict
/// two-tag pattern and dropped when the two disagree.
pub fn detect_gendered_tags(text: &str) -> (bool, Vec<GenderTagMatch>) {
    let mut matches = Vec::new();

    for captures in GENDERED_TAG_PAIR.captures_iter(text) {
        let whole = captures.get(0).unwrap();
        let matched_text = whole.as_str();

        if matched_text.matches('{').count() > 2 {
            if let Some(strict) = STRICT_TAG_PAIR.find(matched_text) {
                if strict.as_str() != matched_text {
                    continue;
                }
            }
        }

        let tag_match = GenderTagMatch {
            first_gender: Gender::from_marker(&captures[1]),
            first_token_index: captures[2].parse().unwrap_or(u32::MAX),
            first_text: captures[3].to_owned(),
            second_gender: Gender::from_marker(&captures[4]),
            second_token_index: captures[5].parse().unwrap_or(u32::MAX),
            second_text: captures[6].to_owned(),
            start: whole.start(),
            end: whole.end(),
        };

        if tag_match.first_gender == Gender::Unknown || tag_match.second_gender == Gender::Unknown
        {
            continue;
        }

        if tag_match.first_gender == tag_match.second_gender {
            continue;
        }

        if tag_match.first_token_index != tag_match.second_token_index {
            continue;
        }

        if tag_match.first_text.to_lowercase() == tag_match.second_text.to_lowercase() {
            continue;
        }

        matches.push(tag_match);
    }

    (!matches.is_empty(), matches)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::tags::{detect_gendered_tags, Gender};

    #[test]
    fn detects_a_simple_pair() {
        let (is_gendered, matches) = detect_gendered_tags("{F0.She}{M0.He} is happy");

        assert!(is_gendered);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].first_gender, Gender::Female);
        assert_eq!(matches[0].second_gender, Gender::Male);
        assert_eq!(matches[0].token_index(), 0);
        assert_eq!(matches[0].female_male_texts(), ("She", "He"));
    }

    #[test]
    fn whitespace_between_tags_is_allowed() {
        let (is_gendered, matches) = detect_gendered_tags("{M2.his} {F2.her} car");

        assert!(is_gendered);
        assert_eq!(matches[0].female_male_texts(), ("her", "his"));
        assert_eq!(matches[0].token_index(), 2);
    }

    #[test]
    fn unknown_gender_is_not_eligible() {
        let (is_gendered, matches) = detect_gendered_tags("{U0.They}{M0.He}");

        assert!(!is_gendered);
        assert!(matches.is_empty());
    }

    #[test]
    fn matching_genders_are_not_eligible() {
        let (is_gendered, _) = detect_gendered_tags("{M0.Him}{M0.Him}");
        assert!(!is_gendered);
    }

    #[test]
    fn differing_token_indices_are_not_eligible() {
        let (is_gendered, _) = detect_gendered_tags("{M0.Him}{F1.Her}");
        assert!(!is_gendered);
    }

    #[test]
    fn identical_text_pairs_are_not_eligible() {
        let (is_gendered, _) = detect_gendered_tags("{F0.Girlfriend}{M0.Girlfriend}");
        assert!(!is_gendered);

        let (is_gendered, _) = detect_gendered_tags("{F0.Host}{M0.Host}");
        assert!(!is_gendered);
    }

    #[test]
    fn chained_tags_are_discarded() {
        let (is_gendered, matches) = detect_gendered_tags("{F0.She}{M0.He}{F1.Her}");

        assert!(!is_gendered);
        assert!(matches.is_empty());
    }

    #[test]
    fn multiple_pairs_arrive_in_document_order() {
        let text = "{F0.She}{M0.He} said {F0.her}{M0.his} line";
        let (_, matches) = detect_gendered_tags(text);

        assert_eq!(matches.len(), 2);
        assert!(matches[0].end <= matches[1].start);
        assert_eq!(matches[0].female_male_texts(), ("She", "He"));
        assert_eq!(matches[1].female_male_texts(), ("her", "his"));
    }

    #[test]
    fn multi_digit_token_indices_parse_fully() {
        let (_, matches) = detect_gendered_tags("{F12.She}{M12.He}");

        assert_eq!(matches[0].token_index(), 12);
    }
}
