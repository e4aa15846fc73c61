//! Log sanitization utilities
//!
//! Keeps bearer tokens and large entry values out of debug/error logs.

/// Longest body, in characters, written to the log as-is.
const MAX_LOGGED_CHARS: usize = 256;

const BEARER_PREFIX: &str = "Bearer ";

/// Cuts `s` after [`MAX_LOGGED_CHARS`] characters and notes how much was dropped.
pub fn truncate_for_log(s: &str) -> String {
    match s.char_indices().nth(MAX_LOGGED_CHARS) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}... [{} more bytes]", &s[..cut], s.len() - cut),
    }
}

/// Replace every `Bearer <token>` occurrence with `Bearer ***`.
///
/// The token ends at the first whitespace, quote or comma.
pub fn mask_token(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find(BEARER_PREFIX) {
        let (head, tail) = rest.split_at(pos + BEARER_PREFIX.len());
        out.push_str(head);
        let end = tail
            .find(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | ','))
            .unwrap_or(tail.len());
        if end > 0 {
            out.push_str("***");
        }
        rest = &tail[end..];
    }

    out.push_str(rest);
    out
}

/// Mask tokens, then truncate.
pub fn sanitize_for_log(s: &str) -> String {
    truncate_for_log(&mask_token(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodies_up_to_the_limit_are_kept() {
        assert_eq!(truncate_for_log("hello world"), "hello world");
        let full = "a".repeat(MAX_LOGGED_CHARS);
        assert_eq!(truncate_for_log(&full), full);
    }

    #[test]
    fn long_bodies_report_dropped_bytes() {
        let s = "a".repeat(MAX_LOGGED_CHARS + 100);
        let result = truncate_for_log(&s);
        assert!(result.starts_with(&"a".repeat(MAX_LOGGED_CHARS)));
        assert!(result.ends_with("... [100 more bytes]"), "{result}");
    }

    #[test]
    fn cuts_on_character_boundaries() {
        // 每个字符 3 字节
        let s = "值".repeat(300);
        let result = truncate_for_log(&s);
        assert!(result.starts_with(&"值".repeat(MAX_LOGGED_CHARS)));
        assert!(result.ends_with("... [132 more bytes]"), "{result}");
    }

    #[test]
    fn mask_token_in_header_line() {
        assert_eq!(
            mask_token("Authorization: Bearer ya29.a0AfH6SM"),
            "Authorization: Bearer ***"
        );
    }

    #[test]
    fn mask_token_inside_json() {
        let body = r#"{"auth":"Bearer abc.def","other":"Bearer xyz"}"#;
        assert_eq!(
            mask_token(body),
            r#"{"auth":"Bearer ***","other":"Bearer ***"}"#
        );
    }

    #[test]
    fn mask_token_without_token_is_identity() {
        assert_eq!(mask_token("no secrets here"), "no secrets here");
        assert_eq!(mask_token("Bearer "), "Bearer ");
    }

    #[test]
    fn sanitize_masks_before_truncating() {
        let body = format!("Bearer {}", "t".repeat(1000));
        let result = sanitize_for_log(&body);
        assert_eq!(result, "Bearer ***");
    }
}
