/// The delimiter wrapped around a pattern body when composing it for the engine.
pub const DELIMITER: char = '/';

/// Escape a raw pattern body for embedding between delimiters.
///
/// A bare delimiter gains a backslash; a character already preceded by
/// an unescaped backslash is copied as it is.
pub fn escape(body: &str) -> String {
    let mut s = String::with_capacity(body.len() + 2);
    let mut escaped = false;

    for c in body.chars() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == DELIMITER {
            s.push('\\');
        }

        s.push(c);
    }

    s
}

/// Quote text so that it matches only itself when used inside a pattern.
pub fn quote(text: &str) -> String {
    let mut s = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        match c {
            '.' | '\\' | '+' | '*' | '?' | '[' | '^' | ']' | '$' | '(' | ')' | '{' | '}' | '=' | '!' | '<' | '>'
            | '|' | ':' | '-' | '#' | DELIMITER => {
                s.push('\\');
                s.push(c);
            }
            '\0' => s.push_str("\\000"),
            _ => s.push(c),
        }
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        let _ = pretty_env_logger::try_init();

        assert_eq!(escape("abc"), "abc");
        assert_eq!(escape("a/b"), r"a\/b");
        assert_eq!(escape(r"a\/b"), r"a\/b");
        assert_eq!(escape(r"a\\/b"), r"a\\\/b");
        assert_eq!(escape(r"\d+/\w+"), r"\d+\/\w+");
        assert_eq!(escape("é/ü"), r"é\/ü");
        assert_eq!(escape(r"trailing\"), r"trailing\");
    }

    #[test]
    fn test_quote() {
        let _ = pretty_env_logger::try_init();

        assert_eq!(quote("a.b*c"), r"a\.b\*c");
        assert_eq!(quote("1/2 (x) #3"), r"1\/2 \(x\) \#3");
        assert_eq!(quote("a\0b"), r"a\000b");
        assert_eq!(quote("plain text"), "plain text");
    }
}
