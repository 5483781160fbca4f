//! Plain-text normalization for provider payloads.

/// Longest entity body we try to resolve (`#x10FFFF` plus some slack).
const MAX_ENTITY_LEN: usize = 10;

/// Decode HTML character references into plain text.
///
/// Handles the named entities trivia banks emit plus any decimal (`&#39;`) or
/// hexadecimal (`&#x27;`) reference. Unknown or malformed references are kept verbatim.
#[must_use]
pub fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let terminator = tail
            .bytes()
            .skip(1)
            .take(MAX_ENTITY_LEN + 1)
            .position(|b| b == b';');
        if let Some(end) = terminator {
            let name = &tail[1..=end];
            if push_entity(name, &mut out) {
                rest = &tail[end + 2..];
                continue;
            }
        }

        out.push('&');
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}

fn push_entity(name: &str, out: &mut String) -> bool {
    if let Some(numeric) = name.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => numeric.parse::<u32>().ok(),
        };
        return match code.and_then(char::from_u32) {
            Some(ch) => {
                out.push(ch);
                true
            }
            None => false,
        };
    }

    match named_entity(name) {
        Some(text) => {
            out.push_str(text);
            true
        }
        None => false,
    }
}

fn named_entity(name: &str) -> Option<&'static str> {
    let text = match name {
        "quot" => "\"",
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "apos" => "'",
        "rsquo" | "lsquo" => "'",
        "ldquo" | "rdquo" => "\"",
        "hellip" => "…",
        "ndash" => "–",
        "mdash" => "—",
        "nbsp" => " ",
        "shy" => "",
        "deg" => "°",
        "times" => "×",
        "divide" => "÷",
        "pi" => "π",
        "eacute" => "é",
        "Eacute" => "É",
        "egrave" => "è",
        "ecirc" => "ê",
        "euml" => "ë",
        "aacute" => "á",
        "agrave" => "à",
        "acirc" => "â",
        "auml" => "ä",
        "Auml" => "Ä",
        "aring" => "å",
        "Aring" => "Å",
        "iacute" => "í",
        "iuml" => "ï",
        "oacute" => "ó",
        "ocirc" => "ô",
        "ouml" => "ö",
        "Ouml" => "Ö",
        "oslash" => "ø",
        "Oslash" => "Ø",
        "uacute" => "ú",
        "uuml" => "ü",
        "Uuml" => "Ü",
        "ntilde" => "ñ",
        "ccedil" => "ç",
        "szlig" => "ß",
        _ => return None,
    };
    Some(text)
}
