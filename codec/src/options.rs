//! Per-field options.
//!
//! Options reach a field from two places: the field's tag (declared with the type, consulted
//! when encoding and when indexing aliases) and the `:suffix` of a schema key (consulted when
//! decoding).
//!
//! A tag is a comma-separated list whose first segment is the field's alias:
//!
//! ```
//! use cellgrid_codec::FieldOptions;
//!
//! let opts = FieldOptions::parse_tag("created,datetime");
//! assert_eq!(opts.alias(), Some("created"));
//! assert!(opts.is_datetime());
//!
//! let opts = FieldOptions::parse_suffix("csv");
//! assert_eq!(opts.alias(), None);
//! assert!(opts.is_packed());
//! ```

/// Tag value that removes a field from both encoding and decoding.
pub const EXCLUDED_TAG: &str = "-";

const DATETIME: &str = "datetime";
const PACKED: &str = "csv";

/// Flags and alias attached to one field occurrence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldOptions {
    alias: Option<String>,
    datetime: bool,
    packed: bool,
}

impl FieldOptions {
    /// Parses a field tag: the alias, then flag tokens.
    pub fn parse_tag(tag: &str) -> Self {
        let mut segments = tag.split(',');
        let alias = segments
            .next()
            .map(str::trim)
            .filter(|alias| !alias.is_empty() && *alias != EXCLUDED_TAG)
            .map(str::to_string);
        let mut opts = Self {
            alias,
            ..Self::default()
        };
        segments.for_each(|token| opts.apply(token));
        opts
    }

    /// Parses a schema-key suffix (the text after the first `:`), where every segment is a
    /// flag token.
    pub fn parse_suffix(suffix: &str) -> Self {
        let mut opts = Self::default();
        suffix.split(',').for_each(|token| opts.apply(token));
        opts
    }

    fn apply(&mut self, token: &str) {
        match token.trim() {
            DATETIME => self.datetime = true,
            PACKED => self.packed = true,
            _ => {}
        }
    }

    /// Returns the declared alias, if any.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Returns true if the field is rendered and parsed through the datetime contract.
    pub fn is_datetime(&self) -> bool {
        self.datetime
    }

    /// Returns true if a list field is packed into a single separated cell.
    pub fn is_packed(&self) -> bool {
        self.packed
    }

    /// Returns the schema-key suffix that reproduces these flags, including the leading `:`,
    /// or an empty string if no flag is set.
    pub fn suffix(&self) -> String {
        let tokens: Vec<&str> = [(self.datetime, DATETIME), (self.packed, PACKED)]
            .into_iter()
            .filter_map(|(set, token)| set.then_some(token))
            .collect();
        if tokens.is_empty() {
            return String::new();
        }
        format!(":{}", tokens.join(","))
    }
}

/// Splits a schema key into its field key and parsed suffix options.
///
/// A `:` at position 0 is part of the key. A trailing `:` with nothing after it is stripped
/// and yields no options.
pub(crate) fn split_key(raw: &str) -> (&str, Option<FieldOptions>) {
    match raw.find(':') {
        Some(idx) if idx > 0 => {
            let suffix = &raw[idx + 1..];
            let opts = (!suffix.is_empty()).then(|| FieldOptions::parse_suffix(suffix));
            (&raw[..idx], opts)
        }
        _ => (raw, None),
    }
}
