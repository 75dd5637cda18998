//! Language handlers: the locale-specific rules resolution leans on.

pub mod english;

pub use english::EnglishHandler;

use crate::pronouns::PronounSetTable;
use crate::tags::GenderTagMatch;

/// Locale rules for one game language.
///
/// A handler supplies everything about resolution that depends on the language the string
/// tables were written in: how tag texts canonicalize into pair identifiers, which STBL
/// resources belong to the language, the built-in pronoun sets, and the formatting rules
/// for names and money.
pub trait LanguageHandler {
    /// The game's identifier for the handled language, e.g. `"en-us"`.
    fn language_code(&self) -> &'static str;

    /// Canonicalize one tag text into its half of a pair identifier.
    fn tag_text_identifier_part(&self, tag_text: &str) -> String;

    /// Repair known tag-usage inconsistencies in the game's own strings before the text
    /// is indexed. `matches` are the eligible pairs found in `text`, in document order.
    fn fix_tag_usage_inconsistency(&self, text: &str, matches: &[GenderTagMatch]) -> String;

    /// The pronoun sets that ship built-in for this language, keyed by set id.
    fn standard_pronoun_sets(&self) -> PronounSetTable;

    /// Set ids reserved for the built-in sets; user-authored sets may not claim these.
    fn reserved_set_ids(&self) -> Vec<&'static str>;

    /// Whether an STBL resource, identified by its upper-case 16-digit instance hex id,
    /// holds strings for this language.
    fn handles_stbl_instance(&self, instance_hex_id: &str) -> bool;

    /// Join a Sim's first and last name into a full display name.
    fn sim_full_name(&self, first_name: &str, last_name: &str) -> String;

    /// Format an amount of money for display.
    fn money_string(&self, amount: f64) -> String;
}
