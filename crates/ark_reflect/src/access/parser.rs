use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::access::{AccessPath, ParseError, PathSegment};

// -----------------------------------------------------------------------------
// Name validation

fn check_name(name: &str) -> Result<(), (usize, Cow<'static, str>)> {
    let Some(first) = name.chars().next() else {
        return Err((0, Cow::Borrowed("empty member name")));
    };
    if first.is_ascii_digit() {
        return Err((0, Cow::Borrowed("member name cannot begin with a digit")));
    }
    match name
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphanumeric() && *c != '_')
    {
        Some((at, c)) => Err((at, Cow::Owned(alloc::format!("unexpected character `{c}`")))),
        None => Ok(()),
    }
}

// -----------------------------------------------------------------------------
// StrSegments

/// Iterator over the segments of a `.`-separated path.
///
/// Yields at most one error, after which it is exhausted.
#[derive(Debug, Clone)]
pub struct StrSegments<'a> {
    path: &'a str,
    // Byte position of the next segment.
    cursor: usize,
    done: bool,
}

impl<'a> StrSegments<'a> {
    /// Creates the iterator, skipping one leading `.`.
    pub fn new(path: &'a str) -> Self {
        Self {
            path,
            cursor: usize::from(path.starts_with('.')),
            done: path.is_empty(),
        }
    }

    fn fail(&mut self, offset: usize, error: Cow<'a, str>) -> ParseError<'a> {
        self.done = true;
        ParseError {
            offset,
            path: self.path,
            error,
        }
    }
}

impl<'a> Iterator for StrSegments<'a> {
    type Item = Result<PathSegment<'a>, ParseError<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let path = self.path;
        let start = self.cursor;
        let rest = &path[start..];
        let name = match rest.find('.') {
            Some(end) => {
                self.cursor = start + end + 1;
                &rest[..end]
            }
            None => {
                self.done = true;
                rest
            }
        };
        // A trailing `.` leaves an empty final segment.
        if !self.done && self.cursor == path.len() {
            return Some(Err(self.fail(self.cursor, Cow::Borrowed("empty member name"))));
        }
        if let Err((at, error)) = check_name(name) {
            return Some(Err(self.fail(start + at, error)));
        }
        Some(Ok(PathSegment {
            name: Cow::Borrowed(name),
            offset: start,
        }))
    }
}

impl FusedIterator for StrSegments<'_> {}

// -----------------------------------------------------------------------------
// AccessPath impls

impl<'a> AccessPath<'a> for &'a str {
    #[inline]
    fn segments(&self) -> impl Iterator<Item = Result<PathSegment<'a>, ParseError<'a>>> {
        StrSegments::new(*self)
    }

    #[inline]
    fn display(&self) -> Cow<'a, str> {
        Cow::Borrowed(*self)
    }
}

impl<'a> AccessPath<'a> for &'a String {
    #[inline]
    fn segments(&self) -> impl Iterator<Item = Result<PathSegment<'a>, ParseError<'a>>> {
        StrSegments::new((*self).as_str())
    }

    #[inline]
    fn display(&self) -> Cow<'a, str> {
        Cow::Borrowed((*self).as_str())
    }
}

fn name_list<'a>(names: &[&'a str]) -> impl Iterator<Item = Result<PathSegment<'a>, ParseError<'a>>> {
    names.iter().enumerate().map(|(index, name)| {
        check_name(name)
            .map(|()| PathSegment {
                name: Cow::Borrowed(*name),
                offset: index,
            })
            .map_err(|(_, error)| ParseError {
                offset: index,
                path: *name,
                error,
            })
    })
}

fn join_names<'a>(names: &[&'a str]) -> Cow<'a, str> {
    match names {
        [single] => Cow::Borrowed(single),
        _ => Cow::Owned(names.join(".")),
    }
}

impl<'a> AccessPath<'a> for &'a [&'a str] {
    #[inline]
    fn segments(&self) -> impl Iterator<Item = Result<PathSegment<'a>, ParseError<'a>>> {
        name_list(self)
    }

    #[inline]
    fn display(&self) -> Cow<'a, str> {
        join_names(self)
    }
}

impl<'a, const N: usize> AccessPath<'a> for [&'a str; N] {
    #[inline]
    fn segments(&self) -> impl Iterator<Item = Result<PathSegment<'a>, ParseError<'a>>> {
        name_list(self)
    }

    #[inline]
    fn display(&self) -> Cow<'a, str> {
        join_names(self)
    }
}

impl<'a> AccessPath<'a> for Vec<&'a str> {
    #[inline]
    fn segments(&self) -> impl Iterator<Item = Result<PathSegment<'a>, ParseError<'a>>> {
        name_list(self)
    }

    #[inline]
    fn display(&self) -> Cow<'a, str> {
        join_names(self)
    }
}
