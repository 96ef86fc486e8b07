//! Input sanitization.
//!
//! Normalizes untrusted text independently of detection: control characters,
//! whitespace padding, prompt-framing delimiter tokens and pathological
//! length are removed while legitimate formatting survives. The function is
//! pure and total - for every input and options combination it returns a
//! string and never panics - and it is idempotent: sanitizing its own output
//! changes nothing.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Sanitizer configuration. All switches default to on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizeOptions {
    /// Maximum output length in characters; longer input is truncated,
    /// not rejected.
    pub max_length: usize,
    /// Strip ASCII control characters (tab, newline and carriage return
    /// are preserved as legitimate formatting).
    pub strip_control_chars: bool,
    /// Collapse runs of space/tab into one space and cap consecutive
    /// newlines at 3 so paragraph breaks survive but vertical padding
    /// does not.
    pub normalize_whitespace: bool,
    /// Remove known prompt-framing delimiter tokens case-insensitively.
    pub remove_delimiters: bool,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            max_length: 50_000,
            strip_control_chars: true,
            normalize_whitespace: true,
            remove_delimiters: true,
        }
    }
}

/// Prompt-framing delimiter markers: `[SYSTEM]`, `[/SYSTEM]`, `<system>`,
/// `</system>`, `<<SYS>>`, `<</SYS>>`, `[INST]`/`[[INST]]` and closing
/// forms. Only the markers are removed, never surrounding text.
static DELIMITERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\[/?SYSTEM\]|</?system>|<</?SYS>>|\[\[?/?INST\]?\])")
        .expect("delimiter pattern must compile")
});

static CRLF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n?").expect("crlf pattern must compile"));

static SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("space pattern must compile"));

static NEWLINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{4,}").expect("newline pattern must compile"));

/// Sanitize with default options.
///
/// # Example
///
/// ```rust
/// use promptgate_firewall::sanitize;
///
/// assert_eq!(sanitize("hello   [SYSTEM]   world"), "hello world");
/// ```
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with(input, &SanitizeOptions::default())
}

/// Sanitize optional input; absent input becomes the empty string.
///
/// The detector fails open on absent input, the sanitizer fails closed - an
/// asymmetry preserved from the guarded application's documented behavior.
#[must_use]
pub fn sanitize_opt(input: Option<&str>) -> String {
    input.map(sanitize).unwrap_or_default()
}

/// Sanitize with explicit options.
///
/// Processing order: control stripping, delimiter removal (to a fixed point,
/// so markers reassembled by an inner removal cannot survive), whitespace
/// normalization, truncation to `max_length`, outer trim.
#[must_use]
pub fn sanitize_with(input: &str, options: &SanitizeOptions) -> String {
    let mut text: String = if options.strip_control_chars {
        input.chars().filter(|c| !is_stripped_control(*c)).collect()
    } else {
        input.to_string()
    };

    if options.remove_delimiters {
        // Loop until stable: removing "[SYSTEM]" from "[SYS[SYSTEM]TEM]"
        // reassembles the marker, and a single pass would leak it.
        loop {
            let removed = DELIMITERS.replace_all(&text, "");
            if removed == text {
                break;
            }
            text = removed.into_owned();
        }
    }

    if options.normalize_whitespace {
        text = CRLF.replace_all(&text, "\n").into_owned();
        text = SPACE_RUNS.replace_all(&text, " ").into_owned();
        text = NEWLINE_RUNS.replace_all(&text, "\n\n\n").into_owned();
    }

    if text.chars().count() > options.max_length {
        text = text.chars().take(options.max_length).collect();
    }

    text.trim().to_string()
}

/// ASCII control characters removed by the sanitizer: 0x00-0x08, 0x0B,
/// 0x0C, 0x0E-0x1F and 0x7F. Tab (0x09), newline (0x0A) and carriage
/// return (0x0D) are legitimate formatting, not attack vectors.
fn is_stripped_control(c: char) -> bool {
    matches!(
        c,
        '\u{0000}'..='\u{0008}' | '\u{000B}' | '\u{000C}' | '\u{000E}'..='\u{001F}' | '\u{007F}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        let input = "What is the capital of France?";
        assert_eq!(sanitize(input), input);
    }

    #[test]
    fn test_strips_control_chars() {
        assert_eq!(sanitize("Hello\x00Wor\x1Fld\x7F!"), "HelloWorld!");
    }

    #[test]
    fn test_preserves_tabs_and_newlines() {
        let out = sanitize_with(
            "col1\tcol2\nrow",
            &SanitizeOptions {
                normalize_whitespace: false,
                ..SanitizeOptions::default()
            },
        );
        assert_eq!(out, "col1\tcol2\nrow");
    }

    #[test]
    fn test_collapses_space_runs() {
        assert_eq!(sanitize("a    \t  b"), "a b");
    }

    #[test]
    fn test_caps_newlines_at_three() {
        assert_eq!(sanitize("a\n\n\n\n\n\nb"), "a\n\n\nb");
        // Three newlines survive untouched.
        assert_eq!(sanitize("a\n\n\nb"), "a\n\n\nb");
    }

    #[test]
    fn test_crlf_normalized() {
        assert_eq!(sanitize("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_removes_delimiters_only() {
        assert_eq!(sanitize("before [SYSTEM] after"), "before after");
        assert_eq!(sanitize("x <<SYS>> y <</SYS>> z"), "x y z");
        assert_eq!(sanitize("a [[INST]] b [[/INST]] c"), "a b c");
        assert_eq!(sanitize("<system>text</system>"), "text");
    }

    #[test]
    fn test_delimiter_removal_case_insensitive() {
        assert_eq!(sanitize("a [system] b"), "a b");
        assert_eq!(sanitize("a <SYSTEM> b"), "a b");
    }

    #[test]
    fn test_reassembled_delimiter_removed() {
        // Removing the inner marker reassembles an outer one; the fixed-point
        // loop must catch it.
        assert_eq!(sanitize("[SYS[SYSTEM]TEM]"), "");
    }

    #[test]
    fn test_truncation_is_char_safe() {
        let input = "é".repeat(100);
        let out = sanitize_with(
            &input,
            &SanitizeOptions {
                max_length: 10,
                ..SanitizeOptions::default()
            },
        );
        assert_eq!(out.chars().count(), 10);
    }

    #[test]
    fn test_output_never_exceeds_max_length() {
        let input = "a".repeat(100_000);
        let out = sanitize(&input);
        assert_eq!(out.chars().count(), 50_000);
    }

    #[test]
    fn test_trims_outer_whitespace() {
        assert_eq!(sanitize("   hello   "), "hello");
    }

    #[test]
    fn test_empty_and_absent_input() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize_opt(None), "");
        assert_eq!(sanitize_opt(Some("ok")), "ok");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "plain text",
            "a    b\n\n\n\n\nc",
            "[SYS[SYSTEM]TEM] leftover",
            "  padded  [SYSTEM]  \x00controls\x1F  ",
            "tabs\tand\nnewlines",
        ];
        for input in inputs {
            let once = sanitize(input);
            let twice = sanitize(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_total_on_large_unicode_input() {
        let input = "héllo wörld 😀 ".repeat(10_000);
        let out = sanitize(&input);
        assert!(out.chars().count() <= 50_000);
    }

    #[test]
    fn test_switches_can_be_disabled() {
        let opts = SanitizeOptions {
            strip_control_chars: false,
            normalize_whitespace: false,
            remove_delimiters: false,
            max_length: 50_000,
        };
        let input = "a  [SYSTEM]  b\x01";
        assert_eq!(sanitize_with(input, &opts), input.trim());
    }
}
