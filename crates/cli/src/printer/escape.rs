use std::borrow::Cow;

/// Control characters that survive sanitizing; the JSON encoder turns them
/// into `\n`, `\r` and `\t`, and CSV keeps them verbatim inside quotes.
#[inline]
fn is_kept_control(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\t')
}

#[inline]
fn is_dropped(c: char) -> bool {
    (c as u32) < 0x20 && !is_kept_control(c)
}

/// Drop every control character below U+0020 except newline, carriage
/// return and tab. Everything else passes through unchanged.
///
/// Borrows when there is nothing to drop.
pub fn sanitize<'a>(s: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
    let s = s.into();
    if !s.chars().any(is_dropped) {
        return s;
    }
    Cow::Owned(s.chars().filter(|c| !is_dropped(*c)).collect())
}

/// Quote a CSV field: sanitize, double embedded quotes, wrap in quotes.
pub fn csv_quote(s: &str) -> String {
    let clean = sanitize(s);
    let mut out = String::with_capacity(clean.len() + 2);
    out.push('"');
    for c in clean.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
    out
}
