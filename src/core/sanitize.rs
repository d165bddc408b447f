// src/core/sanitize.rs

/// Decode the HTML character references the archive actually emits:
/// the XML five, `&nbsp;`, a handful of Latin-1 letters, and numeric refs.
/// Unknown references are kept verbatim.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        // Entity names are short; don't scan past the next 12 bytes for ';'.
        let semi = tail
            .char_indices()
            .take(12)
            .find(|&(_, c)| c == ';')
            .map(|(i, _)| i);
        match semi.and_then(|i| decode_one(&tail[1..i]).map(|c| (i, c))) {
            Some((i, ch)) => {
                out.push(ch);
                rest = &tail[i + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_one(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "eacute" => 'é',
        "Eacute" => 'É',
        "egrave" => 'è',
        "aacute" => 'á',
        "agrave" => 'à',
        "iacute" => 'í',
        "oacute" => 'ó',
        "uacute" => 'ú',
        "ntilde" => 'ñ',
        "ouml" => 'ö',
        "uuml" => 'ü',
        "ccedil" => 'ç',
        "ndash" => '–',
        "mdash" => '—',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "hellip" => '…',
        _ => return None,
    };
    Some(ch)
}

/// Collapse whitespace runs (including non-breaking spaces) to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() || ch == '\u{a0}' {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Read a dollar amount such as `$1,200`, `DD: $3,000` or `-$400`.
/// Returns `None` when the text holds no `$` followed by digits.
pub fn parse_money(s: &str) -> Option<i64> {
    let dollar = s.find('$')?;
    let negative = s[..dollar].trim_end().ends_with('-');
    let mut digits = s!();
    for ch in s[dollar + 1..].chars() {
        if ch.is_ascii_digit() { digits.push(ch); }
        else if ch == ',' { continue; }
        else { break; }
    }
    let v: i64 = digits.parse().ok()?;
    Some(if negative { -v } else { v })
}

/// First run of ASCII digits in `s`, parsed.
pub fn leading_number(s: &str) -> Option<u32> {
    let mut digits = s!();
    for ch in s.chars() {
        if ch.is_ascii_digit() { digits.push(ch); }
        else if !digits.is_empty() { break; }
    }
    digits.parse().ok()
}

/// Split the arguments of an inline JS call like
/// `toggle('clue_J_1_1', 'clue_J_1_1_stuck', '<em>…</em>')` into its
/// single- or double-quoted string literals, honoring backslash escapes.
pub fn js_string_args(call: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut chars = call.chars();
    while let Some(ch) = chars.next() {
        if ch != '\'' && ch != '"' { continue; }
        let quote = ch;
        let mut cur = s!();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    if let Some(esc) = chars.next() { cur.push(esc); }
                }
                c if c == quote => break,
                c => cur.push(c),
            }
        }
        args.push(cur);
    }
    args
}

/// Identity key for display names: case-folded, whitespace-collapsed, dots dropped.
/// `Ben S.`, `ben s` and ` BEN  S ` share a key.
pub fn name_key(s: &str) -> String {
    normalize_ws(&s.replace('.', " ")).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_and_numeric_entities() {
        assert_eq!(decode_entities("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode_entities("&quot;hi&quot; &#39;x&#39; &#x41;"), "\"hi\" 'x' A");
        assert_eq!(decode_entities("Pok&eacute;mon"), "Pokémon");
        assert_eq!(decode_entities("AT&T rocks"), "AT&T rocks");
        assert_eq!(decode_entities("&bogus; stays"), "&bogus; stays");
    }

    #[test]
    fn normalize_ws_collapses_nbsp() {
        assert_eq!(normalize_ws("  a \u{a0}\n b  "), "a b");
    }

    #[test]
    fn money_variants() {
        assert_eq!(parse_money("$1,200"), Some(1200));
        assert_eq!(parse_money("DD: $3,000"), Some(3000));
        assert_eq!(parse_money("-$400"), Some(-400));
        assert_eq!(parse_money("What is Paris?"), None);
        assert_eq!(parse_money("$"), None);
    }

    #[test]
    fn leading_number_takes_first_run() {
        assert_eq!(leading_number("Show #8045 - Monday"), Some(8045));
        assert_eq!(leading_number(" 12 "), Some(12));
        assert_eq!(leading_number("none"), None);
    }

    #[test]
    fn js_args_handle_escapes() {
        let call = r#"toggle('clue_J_1_1', 'clue_J_1_1_stuck', '<em class="correct_response">Joan of Arc\'s</em>')"#;
        let args = js_string_args(call);
        assert_eq!(args.len(), 3);
        assert_eq!(args[0], "clue_J_1_1");
        assert_eq!(args[2], r#"<em class="correct_response">Joan of Arc's</em>"#);
    }

    #[test]
    fn name_key_ignores_case_dots_and_spacing() {
        assert_eq!(name_key("Ben S."), name_key(" ben  s"));
        assert_ne!(name_key("Ben S."), name_key("Ben"));
    }
}
