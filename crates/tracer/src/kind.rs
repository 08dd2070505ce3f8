//! Rendering of error kinds into display text.
//!
//! A kind is an opaque label such as `executionFailed` or `invalid_config`.
//! When a record carries no annotation its message is derived from the kind
//! through a [`KindRenderer`]. The renderer is a pure, deterministic function
//! of its input.

/// Maps a kind label to a human-readable message.
pub trait KindRenderer {
    fn render(&self, kind: &str) -> String;
}

impl<F> KindRenderer for F
where
    F: Fn(&str) -> String,
{
    fn render(&self, kind: &str) -> String {
        self(kind)
    }
}

/// Default renderer: splits camelCase, PascalCase, snake_case and kebab-case
/// into lowercase words joined by single spaces.
///
/// ```
/// use tracer::{KindRenderer, SpacedLowercase};
///
/// assert_eq!(SpacedLowercase.render("testErrorTwo"), "test error two");
/// assert_eq!(SpacedLowercase.render("HTTPRequestFailed"), "http request failed");
/// assert_eq!(SpacedLowercase.render("bind_failed"), "bind failed");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct SpacedLowercase;

impl KindRenderer for SpacedLowercase {
    fn render(&self, kind: &str) -> String {
        let chars: Vec<char> = kind.chars().collect();
        let mut out = String::with_capacity(kind.len() + 4);
        let mut pending_space = false;

        for (i, &c) in chars.iter().enumerate() {
            if c == '_' || c == '-' || c.is_whitespace() {
                pending_space = !out.is_empty();
                continue;
            }

            if i > 0 && c.is_uppercase() {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());

                // "testError" and the "R" in "HTTPRequest" both start a word.
                if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                    pending_space = !out.is_empty();
                }
            }

            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.extend(c.to_lowercase());
        }

        out
    }
}
