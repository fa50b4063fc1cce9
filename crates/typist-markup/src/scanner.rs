#![forbid(unsafe_code)]

//! Low-level scanners for brace tokens and bracket groups.

use smallvec::SmallVec;

// ---------------------------------------------------------------------------
// Brace tokens
// ---------------------------------------------------------------------------

/// A `{NAME}` or `{NAME=params}` occurrence in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BraceToken<'a> {
    /// Byte offset of the opening `{`.
    pub start: usize,
    /// Byte offset just past the closing `}`.
    pub end: usize,
    /// Name as written (not case-folded).
    pub name: &'a str,
    /// Everything after the first `=`, if there was one.
    pub params: Option<&'a str>,
}

impl<'a> BraceToken<'a> {
    /// Uppercased name, for matching.
    pub fn key(&self) -> String {
        self.name.to_ascii_uppercase()
    }

    /// `;`-separated parameters. Empty when the token has no `=`.
    pub fn split_params(&self) -> SmallVec<[&'a str; 8]> {
        match self.params {
            Some(p) => p.split(';').collect(),
            None => SmallVec::new(),
        }
    }

    /// First parameter, trimmed; `None` when absent or empty.
    pub fn first_param(&self) -> Option<&'a str> {
        self.params
            .and_then(|p| p.split(';').next())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Find the first well-formed brace token at or after byte `from`.
///
/// A token is `{`, a non-empty name of ASCII letters, digits and `_`,
/// optionally `=` and parameters, then `}`. Parameters may not contain
/// `{`, `}` or a newline. Anything else starting with `{` is plain text.
pub fn find_brace_token(text: &str, from: usize) -> Option<BraceToken<'_>> {
    let mut search = from;
    while search < text.len() {
        let open = search + text.get(search..)?.find('{')?;
        let body_start = open + 1;
        let rest = &text[body_start..];
        let close = rest.find(['{', '}', '\n']);
        if let Some(rel) = close
            && rest.as_bytes()[rel] == b'}'
        {
            let body = &rest[..rel];
            let (name, params) = match body.split_once('=') {
                Some((n, p)) => (n, Some(p)),
                None => (body, None),
            };
            if !name.is_empty() && name.chars().all(is_name_char) {
                return Some(BraceToken {
                    start: open,
                    end: body_start + rel + 1,
                    name,
                    params,
                });
            }
        }
        search = body_start;
    }
    None
}

// ---------------------------------------------------------------------------
// Bracket groups
// ---------------------------------------------------------------------------

/// One unit of bracket-markup text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    /// A visible character. `[[` yields a single `[`.
    Char(char),
    /// A bracket group. `content` excludes the brackets, `raw` includes them.
    Tag { content: &'a str, raw: &'a str },
}

/// Iterator over the [`Piece`]s of a markup text, with byte offsets.
#[derive(Debug, Clone)]
pub struct MarkupScanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> MarkupScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for MarkupScanner<'a> {
    type Item = (usize, Piece<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let rest = self.text.get(start..)?;
        let c = rest.chars().next()?;
        if c != '[' {
            self.pos += c.len_utf8();
            return Some((start, Piece::Char(c)));
        }
        let after = &rest[1..];
        if after.starts_with('[') {
            self.pos += 2;
            return Some((start, Piece::Char('[')));
        }
        match after.find(['[', ']', '\n']) {
            Some(rel) if after.as_bytes()[rel] == b']' => {
                self.pos = start + rel + 2;
                Some((
                    start,
                    Piece::Tag {
                        content: &after[..rel],
                        raw: &rest[..rel + 2],
                    },
                ))
            }
            _ => {
                self.pos += 1;
                Some((start, Piece::Char('[')))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_plain_and_parameterized_tokens() {
        let text = "a{WAVE=1;2}b{ENDWAVE}";
        let t = find_brace_token(text, 0).unwrap();
        assert_eq!((t.start, t.end), (1, 11));
        assert_eq!(t.name, "WAVE");
        assert_eq!(t.params, Some("1;2"));
        assert_eq!(t.split_params().as_slice(), &["1", "2"]);
        let t = find_brace_token(text, t.end).unwrap();
        assert_eq!(t.name, "ENDWAVE");
        assert_eq!(t.params, None);
        assert!(find_brace_token(text, t.end).is_none());
    }

    #[test]
    fn skips_malformed_braces() {
        let text = "{ not a token} {a{WAIT}} {}";
        let t = find_brace_token(text, 0).unwrap();
        assert_eq!(t.name, "WAIT");
        assert_eq!(&text[t.start..t.end], "{WAIT}");
        assert!(find_brace_token(text, t.end).is_none());
        assert!(find_brace_token("{WAIT\n}", 0).is_none());
    }

    #[test]
    fn params_keep_everything_after_first_equals() {
        let t = find_brace_token("{IF=k;a=1;=2}", 0).unwrap();
        assert_eq!(t.params, Some("k;a=1;=2"));
        assert_eq!(t.first_param(), Some("k"));
    }

    #[test]
    fn bracket_groups_and_escapes() {
        let pieces: Vec<_> = MarkupScanner::new("[*]a[[b[c").map(|(_, p)| p).collect();
        assert_eq!(
            pieces,
            vec![
                Piece::Tag {
                    content: "*",
                    raw: "[*]"
                },
                Piece::Char('a'),
                Piece::Char('['),
                Piece::Char('b'),
                Piece::Char('['),
                Piece::Char('c'),
            ]
        );
    }

    #[test]
    fn empty_group_is_a_tag() {
        let pieces: Vec<_> = MarkupScanner::new("[]é").collect();
        assert_eq!(
            pieces,
            vec![
                (0, Piece::Tag { content: "", raw: "[]" }),
                (2, Piece::Char('é')),
            ]
        );
    }
}
