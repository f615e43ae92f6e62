use std::borrow::Cow;

/// Return the ASCII digraph for a transliterable character.
pub fn transliterate_char(c: char) -> Option<&'static str> {
    match c {
        'Ä' => Some("Ae"),
        'Ö' => Some("Oe"),
        'Ü' => Some("Ue"),
        'ä' => Some("ae"),
        'ö' => Some("oe"),
        'ü' => Some("ue"),
        'ß' => Some("ss"),
        _ => None,
    }
}

/// Transliterate a string to its ASCII form. Strings without any mapped
/// characters are returned as-is without allocating.
pub fn transliterate(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| transliterate_char(c).is_some()) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        match transliterate_char(c) {
            Some(ascii) => out.push_str(ascii),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}
