//! Visible-text extraction from HTML pages.

/// Elements whose whole subtree is dropped.
const SKIPPED_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "iframe", "svg", "nav", "footer", "header",
];

/// Return the text nodes of `html` outside skipped elements, each trimmed
/// and joined with single spaces.
pub fn visible_text(html: &str) -> String {
    // ASCII lowercasing keeps byte offsets aligned with `html`.
    let lower = html.to_ascii_lowercase();
    let mut chunks: Vec<String> = Vec::new();
    let mut pos = 0;

    while pos < html.len() {
        let Some(offset) = html[pos..].find('<') else {
            push_text(&mut chunks, &html[pos..]);
            break;
        };
        let tag_start = pos + offset;
        push_text(&mut chunks, &html[pos..tag_start]);

        if lower[tag_start..].starts_with("<!--") {
            pos = match lower[tag_start + 4..].find("-->") {
                Some(end) => tag_start + 4 + end + 3,
                None => html.len(),
            };
            continue;
        }

        let Some(tag_end) = find_tag_end(html, tag_start) else {
            break;
        };
        let inner = &lower[tag_start + 1..tag_end - 1];
        pos = tag_end;

        if inner.starts_with('/') || inner.ends_with('/') {
            continue;
        }
        let name: String = inner
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect();
        if SKIPPED_ELEMENTS.contains(&name.as_str()) {
            let closing = format!("</{name}");
            pos = match lower[tag_end..].find(&closing) {
                Some(at) => {
                    let after = tag_end + at;
                    match html[after..].find('>') {
                        Some(gt) => after + gt + 1,
                        None => html.len(),
                    }
                }
                None => html.len(),
            };
        }
    }

    chunks.join(" ")
}

/// Index just past the `>` closing the tag opened at `start`. A `>` inside a
/// quoted attribute value does not end the tag.
fn find_tag_end(html: &str, start: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (offset, &byte) in html.as_bytes()[start..].iter().enumerate() {
        match (quote, byte) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(byte),
            (None, b'>') => return Some(start + offset + 1),
            (None, _) => {}
        }
    }
    None
}

fn push_text(chunks: &mut Vec<String>, raw: &str) {
    let decoded = decode_entities(raw);
    let text = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
    if !text.is_empty() {
        chunks.push(text);
    }
}

/// Decode the character references that commonly appear in recipe pages.
fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&rest[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        "frac12" => Some('½'),
        "frac14" => Some('¼'),
        "frac34" => Some('¾'),
        "deg" => Some('°'),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
