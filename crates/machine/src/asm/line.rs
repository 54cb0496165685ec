//! Line-level scanning.
//!
//! Handles comment stripping, operand splitting and `#`-directives before
//! any operand is classified. The apostrophe doubles as the comment
//! character and the character-literal delimiter: a `'` followed by exactly
//! one character and a closing `'` is a literal, any other `'` opens a
//! comment. A backslash escapes the character after it.

use crate::common::AsmError;

/// A `#`-directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `#stop` — ignore the rest of the source.
    Stop,
    /// `#skip` — discard the next physical line.
    Skip,
    /// `#define name body` — macro definition.
    Define { name: String, body: String },
}

/// Strips the comment portion of a raw source line.
///
/// Comments open at the first unescaped `;`, or at a `'` that does not
/// begin a complete character literal.
pub fn strip_comment(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b';' => return &raw[..i],
            b'\'' => {
                // A complete literal is `'`, one character, `'`.
                let rest = &raw[i + 1..];
                let mut chars = rest.char_indices();
                match (chars.next(), chars.next()) {
                    (Some(_), Some((next, '\''))) => i += 1 + next + 1,
                    _ => return &raw[..i],
                }
            }
            _ => i += 1,
        }
        // Escapes may skip past a multi-byte boundary; resync.
        while i < bytes.len() && !raw.is_char_boundary(i) {
            i += 1;
        }
    }
    raw
}

/// Splits an operand list on commas, honoring character literals so a
/// `','` operand survives intact. Empty slots between commas are kept so
/// the caller can report them.
pub fn split_operands(rest: &str) -> Vec<String> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Vec::new();
    }

    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = rest.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            ',' => fields.push(std::mem::take(&mut current)),
            '\'' => {
                current.push(c);
                if let Some(inner) = chars.next() {
                    current.push(inner);
                    if chars.peek() == Some(&'\'') {
                        current.push('\'');
                        chars.next();
                    }
                }
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields.into_iter().map(|f| f.trim().to_string()).collect()
}

/// Parses a `#`-prefixed directive line.
pub fn parse_directive(line: &str) -> Result<Directive, AsmError> {
    let mut parts = line.splitn(3, char::is_whitespace);
    let head = parts.next().unwrap_or_default();
    match head {
        "#stop" => Ok(Directive::Stop),
        "#skip" => Ok(Directive::Skip),
        "#define" => {
            let name = parts
                .next()
                .filter(|n| !n.is_empty())
                .ok_or_else(|| AsmError::syntax(line, "`#define` is missing a macro name"))?;
            let body = parts
                .next()
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .ok_or_else(|| AsmError::syntax(line, "`#define` is missing a macro body"))?;
            Ok(Directive::Define {
                name: name.to_string(),
                body: body.to_string(),
            })
        }
        _ => Err(AsmError::syntax(
            head,
            format!("`{head}` is not a directive"),
        )),
    }
}
