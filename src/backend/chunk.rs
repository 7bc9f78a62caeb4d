//! Splitting text into request-sized chunks for the speech endpoint.

/// Longest text the speech endpoint accepts in one request.
pub const MAX_CHUNK_CHARS: usize = 100;

const PUNCTUATION: &[char] = &[
    '.', '!', '?', ';', ':', ',', '¡', '¿', '…', '—', '\n', '。', '！', '？', '，', '、', '：',
    '；', '،', '؟',
];

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Breaks at sentence punctuation first, then at whitespace, and only
/// splits inside a word when a single word is longer than `max_chars`.
/// Adjacent short pieces are joined back together while they fit.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);

    let mut pieces = Vec::new();
    for sentence in sentences(text) {
        if char_len(&sentence) <= max_chars {
            pieces.push(sentence);
        } else {
            pieces.extend(split_words(&sentence, max_chars));
        }
    }

    merge(pieces, max_chars)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        current.push(c);
        if PUNCTUATION.contains(&c) {
            push_trimmed(&mut out, &current);
            current.clear();
        }
    }
    push_trimmed(&mut out, &current);

    out
}

fn push_trimmed(out: &mut Vec<String>, s: &str) {
    let trimmed = s.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

fn split_words(sentence: &str, max_chars: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();

    for word in sentence.split_whitespace() {
        if char_len(word) > max_chars {
            push_trimmed(&mut out, &current);
            current.clear();

            let chars: Vec<char> = word.chars().collect();
            for part in chars.chunks(max_chars) {
                out.push(part.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() {
            char_len(word)
        } else {
            char_len(&current) + 1 + char_len(word)
        };

        if needed > max_chars {
            push_trimmed(&mut out, &current);
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    push_trimmed(&mut out, &current);

    out
}

fn merge(pieces: Vec<String>, max_chars: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    for piece in pieces {
        match out.last_mut() {
            Some(last) if char_len(last) + 1 + char_len(&piece) <= max_chars => {
                last.push(' ');
                last.push_str(&piece);
            }
            _ => out.push(piece),
        }
    }

    out
}
