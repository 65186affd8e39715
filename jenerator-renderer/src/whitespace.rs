//! Jinja block whitespace control, applied to template source before Tera sees it.
//!
//! Tera only knows the explicit `{%-` / `-%}` markers. Pipeline templates are
//! written against Jinja environments built with `trim_blocks` and
//! `lstrip_blocks`, so this pass reproduces those rules on the source text:
//!
//! | Rule                   | Effect                                                        |
//! |------------------------|---------------------------------------------------------------|
//! | `trim_blocks`          | first newline after `%}` / `#}` is removed                    |
//! | `lstrip_blocks`        | spaces and tabs before a line-leading `{%` / `{#` are removed |
//! | `{%+`                  | disables the leading strip for that tag                       |
//! | `+%}`                  | disables the trailing newline trim for that tag               |
//! | no `keep_trailing_newline` | one trailing newline at the end of the source is dropped  |
//!
//! `\r\n` and `\r` are normalized to `\n` first. Expressions (`{{ ... }}`) are
//! copied untouched and `{% raw %}` bodies are copied verbatim; only the
//! closing `{% endraw %}` trims the newline after it. Comments are resolved
//! here and never reach Tera.

/// Rewrite `source` so that Tera renders it the way Jinja would with
/// `trim_blocks=True, lstrip_blocks=True`.
pub fn apply(source: &str) -> String {
    let normalized = normalize_newlines(source);
    let source = normalized.strip_suffix('\n').unwrap_or(&normalized);
    let mut w = Writer::with_capacity(source.len());
    let mut rest = source;
    while let Some(idx) = rest.find('{') {
        let (text, tail) = rest.split_at(idx);
        w.text(text);
        rest = match tail.as_bytes().get(1) {
            Some(b'{') => w.expression(tail),
            Some(b'%') => w.statement(tail),
            Some(b'#') => w.comment(tail),
            _ => {
                w.text("{");
                &tail[1..]
            }
        };
    }
    w.text(rest);
    w.out
}

fn normalize_newlines(source: &str) -> String {
    source.replace("\r\n", "\n").replace('\r', "\n")
}

fn is_blank(s: &str) -> bool {
    s.bytes().all(|b| b == b' ' || b == b'\t')
}

// ---------------------------------------------------------------------------
// Tag parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    None,
    Minus,
    Plus,
}

impl Marker {
    fn of(b: Option<u8>) -> Self {
        match b {
            Some(b'-') => Marker::Minus,
            Some(b'+') => Marker::Plus,
            _ => Marker::None,
        }
    }
}

/// A `{% ... %}` or `{# ... #}` tag split into markers and body.
struct Tag<'a> {
    open: Marker,
    body: &'a str,
    close: Marker,
}

impl<'a> Tag<'a> {
    /// `raw` spans the full tag including its two-byte delimiters.
    fn parse(raw: &'a str) -> Self {
        let mut inner = &raw[2..raw.len() - 2];
        let open = Marker::of(inner.bytes().next());
        if open != Marker::None {
            inner = &inner[1..];
        }
        let close = Marker::of(inner.bytes().last());
        if close != Marker::None {
            inner = &inner[..inner.len() - 1];
        }
        Tag { open, body: inner, close }
    }

    /// Re-emit as a Tera statement; `+` markers are Jinja-only and dropped.
    fn to_tera(&self) -> String {
        let open = if self.open == Marker::Minus { "-" } else { "" };
        let close = if self.close == Marker::Minus { "-" } else { "" };
        format!("{{%{open}{}{close}%}}", self.body)
    }
}

/// Byte offset just past `close`, searching after the two-byte opener and
/// skipping quoted strings.
fn find_close(tail: &str, close: &str) -> Option<usize> {
    let bytes = tail.as_bytes();
    let delim = close.as_bytes();
    let mut i = 2;
    let mut quote: Option<u8> = None;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' || b == b'`' => quote = Some(b),
            None if bytes[i..].starts_with(delim) => return Some(i + delim.len()),
            None => {}
        }
        i += 1;
    }
    None
}

/// Offset of the `{%` that opens the next `endraw` tag.
fn find_endraw(tail: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(rel) = tail[from..].find("{%") {
        let start = from + rel;
        let after = tail[start + 2..].trim_start_matches(['-', '+']).trim_start();
        if let Some(after) = after.strip_prefix("endraw") {
            let after = after.trim_start().trim_start_matches(['-', '+']);
            if after.starts_with("%}") {
                return Some(start);
            }
        }
        from = start + 2;
    }
    None
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

struct Writer {
    out: String,
    /// Offset in `out` where the current source line's output begins.
    line_start: usize,
    /// Only spaces and tabs have been emitted since the last source newline.
    line_clean: bool,
}

impl Writer {
    fn with_capacity(n: usize) -> Self {
        Writer {
            out: String::with_capacity(n),
            line_start: 0,
            line_clean: true,
        }
    }

    fn text(&mut self, s: &str) {
        let before = self.out.len();
        self.out.push_str(s);
        match s.rfind('\n') {
            Some(nl) => {
                self.line_start = before + nl + 1;
                self.line_clean = is_blank(&s[nl + 1..]);
            }
            None => self.line_clean = self.line_clean && is_blank(s),
        }
    }

    fn tag(&mut self, s: &str) {
        self.out.push_str(s);
        self.line_clean = false;
    }

    fn lstrip(&mut self) {
        if self.line_clean {
            self.out.truncate(self.line_start);
        }
    }

    /// Drop one leading newline from `rest`; the next source line starts clean.
    fn trim_newline<'a>(&mut self, rest: &'a str) -> &'a str {
        match rest.strip_prefix('\n') {
            Some(r) => {
                self.line_start = self.out.len();
                self.line_clean = true;
                r
            }
            None => rest,
        }
    }

    fn expression<'a>(&mut self, tail: &'a str) -> &'a str {
        match find_close(tail, "}}") {
            Some(end) => {
                self.tag(&tail[..end]);
                &tail[end..]
            }
            None => {
                self.text(tail);
                ""
            }
        }
    }

    fn statement<'a>(&mut self, tail: &'a str) -> &'a str {
        let Some(end) = find_close(tail, "%}") else {
            self.text(tail);
            return "";
        };
        let tag = Tag::parse(&tail[..end]);
        if tag.open == Marker::None {
            self.lstrip();
        }
        self.tag(&tag.to_tera());

        let rest = &tail[end..];
        if tag.body.trim() == "raw" {
            return self.raw(rest);
        }
        if tag.close == Marker::None {
            self.trim_newline(rest)
        } else {
            rest
        }
    }

    fn raw<'a>(&mut self, tail: &'a str) -> &'a str {
        match find_endraw(tail) {
            Some(start) => {
                self.text(&tail[..start]);
                self.statement(&tail[start..])
            }
            None => {
                self.text(tail);
                ""
            }
        }
    }

    fn comment<'a>(&mut self, tail: &'a str) -> &'a str {
        let Some(end) = tail[2..].find("#}").map(|i| i + 4) else {
            self.text(tail);
            return "";
        };
        let tag = Tag::parse(&tail[..end]);
        match tag.open {
            Marker::Minus => {
                let keep = self.out.trim_end().len();
                self.out.truncate(keep);
                self.line_start = self.line_start.min(keep);
            }
            Marker::None => self.lstrip(),
            Marker::Plus => {}
        }
        self.line_clean = false;

        let rest = &tail[end..];
        match tag.close {
            Marker::Minus => rest.trim_start(),
            Marker::Plus => rest,
            Marker::None => self.trim_newline(rest),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
