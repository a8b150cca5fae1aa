//! JSON decoding with path-aware error messages.

use anyhow::Result;

/// Number of characters of the offending line shown around the error column.
const SNIPPET_WIDTH: usize = 24;

/// Decode a JSON body into `T`.
///
/// On failure the error names the JSON path that failed (e.g. `items[3].$ref`),
/// a short "expected X, got Y" summary, and a snippet of the offending line.
pub fn decode_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(de).map_err(|err| {
        let path = err.path().to_string();
        let inner = err.into_inner();
        let (line, column) = (inner.line(), inner.column());

        let mut msg = String::new();
        if !path.is_empty() && path != "." {
            msg.push_str(&format!("at path '{path}': "));
        }
        msg.push_str(&summarize(&inner.to_string()));
        msg.push_str(&format!(" (line {line} col {column})"));
        if let Some(snippet) = snippet(body, line, column) {
            msg.push('\n');
            msg.push_str(&snippet);
        }
        anyhow::anyhow!(msg)
    })
}

/// Reduce a serde_json message to its essentials.
///
/// `"invalid type: null, expected a string at line 1 column 9"` becomes
/// `"expected a string, got null"`; other messages lose their location suffix.
fn summarize(message: &str) -> String {
    let message = message
        .rsplit_once(" at line ")
        .map_or(message, |(head, _)| head);

    if let Some(rest) = message.strip_prefix("invalid type: ")
        && let Some((actual, expected)) = rest.split_once(", expected ")
    {
        return format!("expected {expected}, got {actual}");
    }
    message.to_owned()
}

/// Render the characters around `column` on `line` (both 1-based) with a caret.
fn snippet(body: &str, line: usize, column: usize) -> Option<String> {
    let target: Vec<char> = body.lines().nth(line.checked_sub(1)?)?.chars().collect();
    if target.is_empty() {
        return None;
    }

    let at = column.saturating_sub(1).min(target.len() - 1);
    let start = at.saturating_sub(SNIPPET_WIDTH / 2);
    let end = (at + SNIPPET_WIDTH / 2).min(target.len());
    let excerpt: String = target[start..end].iter().collect();

    Some(format!("...{excerpt}...\n   {}^", " ".repeat(at - start)))
}
