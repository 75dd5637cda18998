//! Gendered language detection and pronoun resolution for *The Sims 4* localization strings.
//!
//! The game's string tables encode gendered wording as adjacent tag pairs such as
//! `{F0.She}{M0.He}`, where the digit ties the tag to a positional token (usually a Sim).
//! This crate finds those pairs, rewrites them according to each Sim's configured pronoun
//! set, and expands the remaining positional template tags into final display text.
//!
//! The pieces fit together like this:
//!
//! - [`tags`] scans decoded text for eligible gendered tag pairs.
//! - [`pronouns`] models pronoun sets: named mappings from canonical `"female|male"` phrase
//!   pairs to replacements (a literal, a side selector, or a per-string case table).
//! - [`handlers`] carries the locale rules: built-in pronoun sets, phrase canonicalization,
//!   name joining and money formatting.
//! - [`resolve`] rewrites matched pairs and expands the generic `{0.TagName}` template tags
//!   against a caller-supplied token sequence.
//! - [`loader`] pulls every string table out of a package file and indexes the strings that
//!   contain gendered wording.
//!
//! Resolution never guesses: a tag this crate does not understand aborts the string with
//! [`error::Error::UnsupportedTag`] so the caller can fall back to the game's own text.

pub mod error;
pub mod handlers;
pub mod loader;
pub mod prefs;
pub mod pronouns;
pub mod resolve;
pub mod tags;
pub mod tokens;

pub use handlers::{english::EnglishHandler, LanguageHandler};
pub use loader::{load_package_strings, LocalizationStrings};
pub use prefs::{MemoryPreferences, PreferenceStore};
pub use pronouns::{custom_sets_from_json, PairValue, PronounSet, PronounSetTable};
pub use resolve::{resolve_gendered_text, resolve_template};
pub use tags::{detect_gendered_tags, Gender, GenderTagMatch};
pub use tokens::Token;
