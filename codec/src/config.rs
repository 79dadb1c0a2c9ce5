//! Configuration threaded through [crate::Decoder] and [crate::Encoder].

/// Default separator of packed (`csv`) lists.
pub const DEFAULT_SEPARATOR: char = ',';

/// Default schema key of the position-marker column written before every repeated struct.
pub const DEFAULT_INDEX_KEY: &str = "_index";

/// Default `chrono` format used when encoding datetime-formatted fields.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layouts tried (after RFC 3339) when decoding datetime text.
const DEFAULT_DATETIME_LAYOUTS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%d",
    "%Y/%m/%d",
];

/// Configuration shared by the decode and encode engines.
///
/// # Examples
///
/// ```
/// use cellgrid_codec::Config;
///
/// let cfg = Config::default().with_separator(';');
/// assert_eq!(cfg.separator, ';');
/// assert_eq!(cfg.index_key, "_index");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Separator between the pieces of a packed list cell.
    pub separator: char,

    /// Schema key naming the 1-based position-marker column of repeated structs.
    ///
    /// A key equal to this value never resolves to a field.
    pub index_key: String,

    /// Format used to render datetime-formatted fields.
    pub datetime_format: String,

    /// Layouts tried, in order, after RFC 3339 when parsing datetime text.
    ///
    /// Layouts without an offset are interpreted as UTC. Layouts without a time component
    /// resolve to midnight.
    pub datetime_layouts: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            index_key: DEFAULT_INDEX_KEY.to_string(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            datetime_layouts: DEFAULT_DATETIME_LAYOUTS
                .iter()
                .map(|layout| layout.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Sets the packed-list separator.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Sets the schema key of the position-marker column.
    pub fn with_index_key(mut self, key: impl Into<String>) -> Self {
        self.index_key = key.into();
        self
    }

    /// Sets the format used to render datetime-formatted fields.
    pub fn with_datetime_format(mut self, format: impl Into<String>) -> Self {
        self.datetime_format = format.into();
        self
    }

    /// Replaces the layouts tried when parsing datetime text.
    pub fn with_datetime_layouts<I, S>(mut self, layouts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.datetime_layouts = layouts.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if `key` names the position-marker column.
    pub(crate) fn is_index_key(&self, key: &str) -> bool {
        key == self.index_key
    }
}
