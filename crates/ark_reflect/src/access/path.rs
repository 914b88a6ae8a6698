use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::fmt;

// -----------------------------------------------------------------------------
// ParseError

/// An error produced while parsing a path, with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError<'a> {
    /// Byte position in `path`.
    pub offset: usize,
    /// The path that the error occurred in.
    pub path: &'a str,
    /// The underlying error.
    pub error: Cow<'a, str>,
}

impl fmt::Display for ParseError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "encountered an error at offset {} while parsing `{}`: {}",
            self.offset, self.path, self.error,
        )
    }
}

impl core::error::Error for ParseError<'_> {}

// -----------------------------------------------------------------------------
// PathSegment

/// One member access of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment<'a> {
    /// The member name.
    pub name: Cow<'a, str>,
    /// Position of the segment in its path representation.
    ///
    /// A byte offset for string paths, an element index for name lists.
    pub offset: usize,
}

impl PathSegment<'_> {
    /// Returns a segment that owns its name.
    pub fn into_owned(self) -> PathSegment<'static> {
        PathSegment {
            name: Cow::Owned(self.name.into_owned()),
            offset: self.offset,
        }
    }
}

impl fmt::Display for PathSegment<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// -----------------------------------------------------------------------------
// AccessPath

/// A type that can be considered as a member path.
///
/// Implemented for [`&str`](str), [`String`], `[&str; N]`, `&[&str]` and
/// `Vec<&str>`. The string syntax is described in the
/// [module documentation](crate::access).
pub trait AccessPath<'a> {
    /// Parses the path into its segments, from the root to the leaf.
    fn segments(&self) -> impl Iterator<Item = Result<PathSegment<'a>, ParseError<'a>>>;

    /// Renders the path for diagnostics.
    fn display(&self) -> Cow<'a, str>;
}

/// Parses `path` at once, stopping at the first error.
///
/// An empty list of segments is reported as an error.
pub fn parse_path<'a, P: AccessPath<'a> + ?Sized>(
    path: &P,
) -> Result<Vec<PathSegment<'a>>, ParseError<'a>> {
    let segments = path.segments().collect::<Result<Vec<_>, _>>()?;
    if segments.is_empty() {
        return Err(ParseError {
            offset: 0,
            path: "",
            error: Cow::Borrowed("empty path"),
        });
    }
    Ok(segments)
}
