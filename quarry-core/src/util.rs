use std::fmt::{self, Display};

pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

/// Backslash-escapes `'`, `"`, `\` and NUL, the same set of characters C-style SQL dialects escape.
pub fn add_slashes(out: &mut String, value: &str) {
    out.reserve(value.len());
    for c in value.chars() {
        match c {
            '\'' | '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
}

pub fn write_hex(out: &mut String, value: &[u8]) {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    out.reserve(value.len() * 2 + 3);
    out.push_str("X'");
    for b in value {
        out.push(DIGITS[(b >> 4) as usize] as char);
        out.push(DIGITS[(b & 0x0F) as usize] as char);
    }
    out.push('\'');
}

/// Display of a statement cut to a length fit for the logs.
pub struct TruncateLong<'a>(pub &'a str);

impl Display for TruncateLong<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LIMIT: usize = 497;
        if self.0.len() <= LIMIT {
            return f.write_str(self.0.trim_end());
        }
        let mut end = LIMIT;
        while !self.0.is_char_boundary(end) {
            end -= 1;
        }
        write!(f, "{}...", self.0[..end].trim_end())
    }
}

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        $crate::TruncateLong(&$query)
    };
}
