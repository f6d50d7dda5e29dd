use crate::runtime::Slots;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Piece {
    Literal(Vec<u8>),
    Group(usize),
}

/// A parsed replacement string.
///
/// `$n`, `${n}` and `\n` refer to capture group `n` (at most two digits).
/// A backslash before `\` or `$` makes it literal. References to absent
/// or nonexistent groups expand to nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Template(Vec<Piece>);

impl Template {
    /// Parse a replacement string.
    pub fn parse<T: AsRef<[u8]>>(replacement: T) -> Template {
        let s = replacement.as_ref();
        let mut pieces = vec![];
        let mut lit = vec![];
        let mut last = 0u8;
        let mut i = 0;

        while i < s.len() {
            let b = s[i];

            if b == b'\\' || b == b'$' {
                if last == b'\\' {
                    if let Some(prev) = lit.last_mut() {
                        *prev = b;
                    }
                    last = 0;
                    i += 1;
                    continue;
                }

                if let Some((group, len)) = backref(b, &s[i + 1..]) {
                    if !lit.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut lit)));
                    }
                    pieces.push(Piece::Group(group));
                    i += 1 + len;
                    last = s[i - 1];
                    continue;
                }
            }

            lit.push(b);
            last = b;
            i += 1;
        }

        if !lit.is_empty() {
            pieces.push(Piece::Literal(lit));
        }

        Template(pieces)
    }

    /// Returns `true` if the template refers to no capture group.
    pub fn is_literal(&self) -> bool {
        self.0.iter().all(|piece| matches!(piece, Piece::Literal(_)))
    }

    /// Append the expansion for one match of `subject` to `dst`.
    pub fn expand(&self, subject: &[u8], slots: &Slots, dst: &mut Vec<u8>) {
        for piece in &self.0 {
            match piece {
                Piece::Literal(s) => dst.extend_from_slice(s),
                Piece::Group(n) => {
                    if let Some(Some(range)) = slots.get(*n) {
                        dst.extend_from_slice(&subject[range.clone()])
                    }
                }
            }
        }
    }
}

/// Parse the group number following a `$` or `\`, returning it with the number of bytes consumed.
///
/// Only `$` takes the braced `${n}` form.
fn backref(lead: u8, s: &[u8]) -> Option<(usize, usize)> {
    let braced = lead == b'$' && s.first() == Some(&b'{');
    let start = if braced { 1 } else { 0 };
    let digits = s[start..].iter().take(2).take_while(|b| b.is_ascii_digit()).count();

    if digits == 0 {
        return None;
    }

    let group = s[start..start + digits]
        .iter()
        .fold(0, |n, b| n * 10 + (b - b'0') as usize);
    let mut len = start + digits;

    if braced {
        if s.get(len) != Some(&b'}') {
            return None;
        }
        len += 1;
    }

    Some((group, len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(template: &str, subject: &str, slots: Slots) -> String {
        let mut dst = vec![];

        Template::parse(template).expand(subject.as_bytes(), &slots, &mut dst);

        String::from_utf8(dst).unwrap()
    }

    #[test]
    fn test_parse() {
        let _ = pretty_env_logger::try_init();

        assert_eq!(Template::parse("lol"), Template(vec![Piece::Literal(b"lol".to_vec())]));
        assert!(Template::parse("lol").is_literal());
        assert!(Template::parse("").is_literal());
        assert_eq!(
            Template::parse("<$1>"),
            Template(vec![
                Piece::Literal(b"<".to_vec()),
                Piece::Group(1),
                Piece::Literal(b">".to_vec()),
            ])
        );
        assert_eq!(Template::parse("${12}3"), Template(vec![Piece::Group(12), Piece::Literal(b"3".to_vec())]));
        assert_eq!(Template::parse("$123"), Template(vec![Piece::Group(12), Piece::Literal(b"3".to_vec())]));
        assert_eq!(Template::parse(r"\0"), Template(vec![Piece::Group(0)]));
        assert_eq!(Template::parse("${1"), Template(vec![Piece::Literal(b"${1".to_vec())]));
        assert_eq!(Template::parse("$x"), Template(vec![Piece::Literal(b"$x".to_vec())]));
    }

    #[test]
    fn test_escapes() {
        let _ = pretty_env_logger::try_init();

        assert_eq!(Template::parse(r"\$1"), Template(vec![Piece::Literal(b"$1".to_vec())]));
        assert_eq!(Template::parse(r"\\1"), Template(vec![Piece::Literal(br"\1".to_vec())]));
        assert_eq!(Template::parse(r"a\b"), Template(vec![Piece::Literal(br"a\b".to_vec())]));
        assert_eq!(Template::parse(r"\{1}"), Template(vec![Piece::Literal(br"\{1}".to_vec())]));
        assert_eq!(Template::parse(r"\{1"), Template(vec![Piece::Literal(br"\{1".to_vec())]));
    }

    #[test]
    fn test_expand() {
        let _ = pretty_env_logger::try_init();

        let slots = vec![Some(0..5), Some(0..2), None, Some(3..5)];

        assert_eq!(expand("[$0]", "ab-cd", slots.clone()), "[ab-cd]");
        assert_eq!(expand(r"$3\1", "ab-cd", slots.clone()), "cdab");
        assert_eq!(expand("<$2>", "ab-cd", slots.clone()), "<>");
        assert_eq!(expand("<${9}>", "ab-cd", slots), "<>");
    }
}
