/// Configuration options for one decode call.
///
/// # Examples
///
/// ```rust
/// use phpmodem::{DecodeOptions, StringEncoding};
///
/// let options = DecodeOptions {
///     strict: false,
///     ..DecodeOptions::default()
/// };
/// assert_eq!(options.encoding, StringEncoding::Utf8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Whether a class name absent from the scope is an error.
    ///
    /// When `false`, an unresolved class decodes to an incomplete-class
    /// placeholder carrying the original name and fields instead of failing.
    /// Strict mode affects nothing else: structural malformations are fatal
    /// either way.
    ///
    /// # Default
    ///
    /// `true`
    pub strict: bool,

    /// How string contents are surfaced after length slicing.
    ///
    /// The declared length of a string is a byte count, so the raw bytes are
    /// always sliced first; this option only governs what happens to the
    /// slice afterwards.
    ///
    /// # Default
    ///
    /// [`StringEncoding::Utf8`]
    pub encoding: StringEncoding,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict: true,
            encoding: StringEncoding::Utf8,
        }
    }
}

/// Text decoding applied to the length-sliced bytes of a string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringEncoding {
    /// Decode as UTF-8 text, replacing invalid sequences, into
    /// [`Value::String`](crate::Value::String).
    #[default]
    Utf8,
    /// Surface the raw wire bytes unchanged as
    /// [`Value::Bytes`](crate::Value::Bytes).
    Binary,
}
