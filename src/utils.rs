//! Small text helpers shared by the logger and the report layout

/// Remove ANSI color codes from text
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_escape = false;

    for ch in text.chars() {
        if ch == '\x1b' {
            in_escape = true;
        } else if in_escape && ch == 'm' {
            in_escape = false;
        } else if !in_escape {
            result.push(ch);
        }
    }
    result
}

/// Wrap text at word boundaries, respecting existing newlines
///
/// Widths are measured on the ANSI-stripped text. Always returns at least
/// one (possibly empty) line.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut result = Vec::new();

    for line in text.split('\n') {
        if strip_ansi_codes(line).chars().count() <= max_width {
            result.push(line.to_string());
            continue;
        }

        let mut current_line = String::new();
        for word in line.split_whitespace() {
            let word_len = strip_ansi_codes(word).chars().count();
            let current_len = strip_ansi_codes(&current_line).chars().count();

            if word_len > max_width {
                if !current_line.is_empty() {
                    result.push(std::mem::take(&mut current_line));
                }
                let mut chunks = break_long_word(word, max_width);
                // The tail of a broken word can still take following words
                if let Some(last) = chunks.pop() {
                    result.extend(chunks);
                    current_line = last;
                }
            } else if current_line.is_empty() {
                current_line = word.to_string();
            } else if current_len + 1 + word_len <= max_width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                result.push(std::mem::replace(&mut current_line, word.to_string()));
            }
        }

        if !current_line.is_empty() {
            result.push(current_line);
        }
    }

    if result.is_empty() {
        result.push(String::new());
    }
    result
}

/// Split a word into chunks of at most `max_width` characters
fn break_long_word(word: &str, max_width: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(max_width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Replace anything outside printable ASCII with `?`
///
/// The report uses the PDF base-14 fonts, which only cover single-byte text.
pub fn to_printable_ascii(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c,
            '\t' => ' ',
            _ => '?',
        })
        .collect()
}

/// Reduce a string to `[A-Za-z0-9_-]` for use inside a file name
pub fn sanitize_file_component(text: &str, max_len: usize) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(max_len)
        .collect();

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        "token".to_string()
    } else {
        trimmed.to_string()
    }
}

/// True when the string decodes as base58 to a 32-byte public key
pub fn looks_like_solana_address(address: &str) -> bool {
    matches!(bs58::decode(address).into_vec(), Ok(bytes) if bytes.len() == 32)
}

/// Shorten a long address to `abcd1234...wxyz` for log lines
pub fn short_address(address: &str) -> String {
    let count = address.chars().count();
    if count <= 16 {
        return address.to_string();
    }
    let head: String = address.chars().take(8).collect();
    let tail: String = address.chars().skip(count - 4).collect();
    format!("{}...{}", head, tail)
}
