//! Formatting utilities (Telegram HTML escaping, message splitting).

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Split plain text into chunks of at most `limit` characters.
///
/// Prefers blank-line (block) boundaries, then line boundaries, then raw
/// character boundaries.
pub fn split_text(text: &str, limit: usize) -> Vec<String> {
    split_with(text, limit, hard_split_text)
}

/// Split Telegram HTML into chunks of at most `limit` characters.
///
/// Same boundaries as [`split_text`]. A hard cut never lands inside a tag or
/// an entity; tags open at the cut are closed at the end of the chunk and
/// reopened at the start of the next one, so every chunk parses on its own.
pub fn split_html(html: &str, limit: usize) -> Vec<String> {
    split_with(html, limit, hard_split_html)
}

fn split_with(text: &str, limit: usize, hard: fn(&str, usize) -> Vec<String>) -> Vec<String> {
    let limit = limit.max(16);
    if text.chars().count() <= limit {
        return vec![text.to_string()];
    }

    let mut out = Vec::new();
    let mut current = String::new();

    for block in text.split("\n\n") {
        push_piece(&mut out, &mut current, block, "\n\n", limit, |block, out, cur| {
            for line in block.split('\n') {
                push_piece(out, cur, line, "\n", limit, |line, out, cur| {
                    flush(out, cur);
                    out.extend(hard(line, limit));
                });
            }
        });
    }
    flush(&mut out, &mut current);
    out
}

/// Append `piece` to `current` (joined by `sep`), flushing when it would overflow.
/// Pieces that cannot fit even in an empty chunk are handed to `oversize`.
fn push_piece(
    out: &mut Vec<String>,
    current: &mut String,
    piece: &str,
    sep: &str,
    limit: usize,
    oversize: impl FnOnce(&str, &mut Vec<String>, &mut String),
) {
    let piece_len = piece.chars().count();
    let cur_len = current.chars().count();
    let sep_len = if current.is_empty() { 0 } else { sep.len() };

    if cur_len + sep_len + piece_len <= limit {
        if !current.is_empty() {
            current.push_str(sep);
        }
        current.push_str(piece);
        return;
    }

    flush(out, current);
    if piece_len <= limit {
        current.push_str(piece);
    } else {
        oversize(piece, out, current);
    }
}

fn flush(out: &mut Vec<String>, current: &mut String) {
    if !current.trim().is_empty() {
        out.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

fn hard_split_text(s: &str, limit: usize) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    chars
        .chunks(limit)
        .map(|c| c.iter().collect::<String>())
        .collect()
}

/// An open tag: its name (for the closing tag) and its full text (for reopening).
struct OpenTag<'a> {
    name: &'a str,
    raw: &'a str,
}

fn hard_split_html(s: &str, limit: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut open: Vec<OpenTag<'_>> = Vec::new();
    let mut chunk = String::new();
    let mut chunk_len = 0;
    let mut has_content = false;

    for token in html_tokens(s) {
        let closing = token.strip_prefix("</").and_then(|t| t.strip_suffix('>'));
        // A closing tag was already reserved for in `close_len`.
        let needed = if closing.is_some() {
            0
        } else {
            token.chars().count()
        };
        let close_len: usize = open.iter().map(|t| t.name.chars().count() + 3).sum();

        if has_content && chunk_len + needed + close_len > limit {
            for tag in open.iter().rev() {
                chunk.push_str(&format!("</{}>", tag.name));
            }
            out.push(std::mem::take(&mut chunk));
            chunk_len = 0;
            has_content = false;
            for tag in &open {
                chunk.push_str(tag.raw);
                chunk_len += tag.raw.chars().count();
            }
        }

        chunk.push_str(token);
        chunk_len += token.chars().count();

        if let Some(name) = closing {
            if open.last().map(|t| t.name) == Some(name) {
                open.pop();
            }
        } else if let Some(inner) = token.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
            let name = inner.split_whitespace().next().unwrap_or(inner);
            open.push(OpenTag { name, raw: token });
        } else {
            has_content = true;
        }
    }

    if !chunk.is_empty() {
        out.push(chunk);
    }
    out
}

/// Tokenize escaped HTML into tags, entities and single characters.
fn html_tokens(s: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = s;

    while let Some(c) = rest.chars().next() {
        let len = match c {
            '<' => rest.find('>').map(|i| i + 1),
            '&' => rest
                .char_indices()
                .take(10)
                .find(|&(_, ch)| ch == ';' || ch.is_whitespace())
                .filter(|&(_, ch)| ch == ';')
                .map(|(i, _)| i + 1),
            _ => None,
        }
        .unwrap_or(c.len_utf8());

        let (token, tail) = rest.split_at(len);
        tokens.push(token);
        rest = tail;
    }
    tokens
}
