//! Substitution tokens supplied by the caller at resolution time.

/// One positional value substituted into a string's template tags.
///
/// The variants mirror the token types the game attaches to a localized string. The caller
/// builds the sequence before resolution; the resolver only reads it. Template tags address
/// tokens by position, so the order of the sequence matters.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// A Sim, addressed by tags like `{0.SimFirstName}` and by gendered tag pairs.
    Sim {
        /// the Sim's persistent id, used to look up pronoun preferences
        id: u64,
        first_name: String,
        last_name: String,
        /// which side of a gendered tag pair the Sim takes by default
        is_female: bool,
        /// string key of the Sim's full display name; `0` when there is none
        full_name_key: u32,
    },

    /// Pre-rendered text, addressed by `{0.String}`.
    RawString { value: String },

    /// A number, addressed by `{0.Number}` or `{0.Money}`.
    Number { value: f64 },

    /// Another localized string, substituted by its string table key and resolved against
    /// its own token sequence.
    Nested { hash: u32, tokens: Vec<Token> },

    /// A game object, addressed by the `Object*` family of tags.
    Object {
        /// player-given name; empty when the object is unnamed
        custom_name: String,
        /// player-given description; empty when the object has none
        custom_description: String,
        /// string key of the object's catalog name
        catalog_name_key: u32,
        /// string key of the object's catalog description
        catalog_description_key: u32,
    },
}

impl Token {
    /// Convenience constructor for a Sim token with no full-name string key.
    pub fn sim(id: u64, first_name: &str, last_name: &str, is_female: bool) -> Token {
        Token::Sim {
            id,
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            is_female,
            full_name_key: 0,
        }
    }

    /// Convenience constructor for a raw text token.
    pub fn raw(value: &str) -> Token {
        Token::RawString {
            value: value.to_owned(),
        }
    }

    /// Convenience constructor for a number token.
    pub fn number(value: f64) -> Token {
        Token::Number { value }
    }

    /// Convenience constructor for a nested localized string with no tokens of its own.
    pub fn nested(hash: u32) -> Token {
        Token::Nested {
            hash,
            tokens: Vec::new(),
        }
    }
}

/// Format a number the way the game prints it: whole values without a decimal point.
pub(crate) fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
