//! Inline notation: short parenthesized tokens in rule text become icon
//! markup with the original text kept as a fallback.

/// Longest parenthesized run (in chars) that still gets an icon. Anything
/// longer is ordinary prose in parentheses and stays literal.
pub const MAX_ICON_KEY_CHARS: usize = 15;

/// Flatten full-width parentheses to their half-width equivalents.
pub fn normalize_parens(text: &str) -> String {
    text.replace('（', "(").replace('）', ")")
}

/// Rewrite each qualifying `(token)` into an `<img>` icon reference keyed
/// by the trimmed token. The original matched text rides along as the alt
/// text and as an `onerror` replacement, so a missing icon degrades to the
/// literal notation. Matches are non-overlapping, left to right; runs of
/// 16+ chars, empty parens, and unclosed parens stay literal. Pure.
pub fn format_inline(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let normalized = normalize_parens(text);
    let chars: Vec<char> = normalized.chars().collect();
    let mut output = String::with_capacity(normalized.len());

    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '(' {
            if let Some(close) = qualifying_close(&chars, i) {
                let key: String = chars[i + 1..close].iter().collect();
                let matched: String = chars[i..=close].iter().collect();
                output.push_str(&icon_markup(key.trim(), &matched));
                i = close + 1;
                continue;
            }
        }
        output.push(chars[i]);
        i += 1;
    }
    output
}

/// Index of the closing paren when the run opened at `open` qualifies for
/// icon replacement: 1..=MAX_ICON_KEY_CHARS chars, no nested paren.
fn qualifying_close(chars: &[char], open: usize) -> Option<usize> {
    let mut length = 0;
    for (offset, &ch) in chars[open + 1..].iter().enumerate() {
        match ch {
            ')' => {
                return if (1..=MAX_ICON_KEY_CHARS).contains(&length) {
                    Some(open + 1 + offset)
                } else {
                    None
                };
            }
            '(' => return None,
            _ => {
                length += 1;
                if length > MAX_ICON_KEY_CHARS {
                    return None;
                }
            }
        }
    }
    None
}

fn icon_markup(key: &str, matched: &str) -> String {
    let src_key = escape_attr(key);
    let alt = escape_attr(matched);
    // onerror body is a single-quoted JS string inside a double-quoted
    // attribute: quote-escape for JS first, then for the attribute.
    let fallback = escape_attr(&escape_quotes(matched));
    format!(
        "<img class=\"rule-icon\" src=\"./icons/{src_key}.svg\" alt=\"{alt}\" \
         onerror=\"this.replaceWith('{fallback}')\">"
    )
}

fn escape_attr(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn escape_quotes(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
