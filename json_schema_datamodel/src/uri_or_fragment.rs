//! A `$ref` value: either a document-local fragment (`#...`) or a URI.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Base used only to check that a relative reference is well formed.
const RELATIVE_CHECK_BASE: &str = "http://relative.invalid/";

/// The input is neither a fragment nor a parseable URI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid URI or fragment '{input}': {reason}")]
pub struct UriFormatError {
    pub input: String,
    pub reason: url::ParseError,
}

/// A URI reference, absolute or relative.
#[derive(Debug, Clone)]
pub enum UriReference {
    Absolute(Url),
    /// Relative references are kept verbatim; they compare including their fragment.
    Relative(String),
}

impl UriReference {
    /// Fragment portion including the leading `#`, or `None` when absent.
    #[must_use]
    pub fn fragment(&self) -> Option<String> {
        match self {
            Self::Absolute(url) => url.fragment().map(|f| format!("#{f}")),
            Self::Relative(raw) => raw.find('#').map(|idx| raw[idx..].to_string()),
        }
    }

    #[must_use]
    pub const fn is_absolute(&self) -> bool {
        matches!(self, Self::Absolute(_))
    }

    fn without_fragment(url: &Url) -> Url {
        let mut stripped: Url = url.clone();
        stripped.set_fragment(None);
        stripped
    }
}

impl PartialEq for UriReference {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Compared by hand so the fragment check stays explicit.
            (Self::Absolute(left), Self::Absolute(right)) => {
                Self::without_fragment(left) == Self::without_fragment(right)
                    && left.fragment() == right.fragment()
            }
            (Self::Relative(left), Self::Relative(right)) => left == right,
            _ => false,
        }
    }
}

impl Eq for UriReference {}

impl Hash for UriReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Absolute(url) => {
                0_u8.hash(state);
                Self::without_fragment(url).as_str().hash(state);
                url.fragment().hash(state);
            }
            Self::Relative(raw) => {
                1_u8.hash(state);
                raw.hash(state);
            }
        }
    }
}

impl fmt::Display for UriReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(url) => f.write_str(url.as_str()),
            Self::Relative(raw) => f.write_str(raw),
        }
    }
}

/// A reference that is either a local fragment or a URI. Exactly one of
/// [`UriOrFragment::is_fragment`] and [`UriOrFragment::is_uri`] holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UriOrFragment {
    /// Fragment string, retaining the leading `#` (may be just `"#"`).
    Fragment(String),
    Uri(UriReference),
}

impl UriOrFragment {
    /// Parse a reference string.
    ///
    /// # Errors
    ///
    /// Returns `UriFormatError` if the input does not start with `#` and is not
    /// a valid absolute or relative URI (for example, a non-numeric port).
    pub fn parse(input: &str) -> Result<Self, UriFormatError> {
        if input.starts_with('#') {
            return Ok(Self::Fragment(input.to_string()));
        }
        match Url::parse(input) {
            Ok(url) => Ok(Self::Uri(UriReference::Absolute(url))),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base: Url = Url::parse(RELATIVE_CHECK_BASE).map_err(|reason| UriFormatError {
                    input: input.to_string(),
                    reason,
                })?;
                base.join(input).map_err(|reason| UriFormatError {
                    input: input.to_string(),
                    reason,
                })?;
                Ok(Self::Uri(UriReference::Relative(input.to_string())))
            }
            Err(reason) => Err(UriFormatError {
                input: input.to_string(),
                reason,
            }),
        }
    }

    #[must_use]
    pub const fn is_fragment(&self) -> bool {
        matches!(self, Self::Fragment(_))
    }

    #[must_use]
    pub const fn is_uri(&self) -> bool {
        matches!(self, Self::Uri(_))
    }

    /// The fragment string, including the leading `#`.
    ///
    /// # Panics
    ///
    /// Panics if this value is a URI. Check [`UriOrFragment::is_fragment`] first.
    #[must_use]
    pub fn fragment(&self) -> &str {
        match self {
            Self::Fragment(fragment) => fragment,
            Self::Uri(uri) => panic!("'{uri}' is a URI, not a fragment"),
        }
    }

    /// The URI value.
    ///
    /// # Panics
    ///
    /// Panics if this value is a fragment. Check [`UriOrFragment::is_uri`] first.
    #[must_use]
    pub fn uri(&self) -> &UriReference {
        match self {
            Self::Uri(uri) => uri,
            Self::Fragment(fragment) => panic!("'{fragment}' is a fragment, not a URI"),
        }
    }
}

impl FromStr for UriOrFragment {
    type Err = UriFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UriOrFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fragment(fragment) => f.write_str(fragment),
            Self::Uri(uri) => fmt::Display::fmt(uri, f),
        }
    }
}
