//! Log sanitization for clinical values.
//!
//! Form values are patient data. They should never reach a log call, but a
//! stray `{:?}` of [`ClinicalInputs`](crate::domain::ClinicalInputs) would
//! print all of them. The writer wrapper below scrubs every formatted line
//! before it hits the sink:
//! - `field=value` / `field: value` pairs for any recognised form field
//! - Debug-formatted struct fields (`albumin: "4.0"`)
//! - JSON members (`"albumin":"4.0"`)
//!
//! # Performance / DoS
//!
//! Lines longer than `HEPASCOPE_SANITIZE_MAX_BYTES` (default 16 KiB) are
//! truncated before scanning.

use regex::Regex;
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

use crate::domain::Field;

/// Compiled redaction rules.
static PATTERNS: OnceLock<Vec<Redaction>> = OnceLock::new();

const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

const REDACTED: &str = "[REDACTED]";

struct Redaction {
    regex: Regex,
    replacement: String,
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }

    let mut end = max_bytes.min(input.len());
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn max_sanitize_bytes() -> usize {
    std::env::var("HEPASCOPE_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

/// Field names as they may appear in logs: wire names and Rust field names.
fn field_alternation() -> String {
    let mut names: Vec<String> = Vec::new();
    for field in Field::ALL {
        names.push(regex::escape(field.name()));
        let snake = to_snake_case(field.name());
        if snake != field.name() {
            names.push(regex::escape(&snake));
        }
    }
    names.join("|")
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn get_patterns() -> &'static [Redaction] {
    PATTERNS.get_or_init(|| {
        let names = field_alternation();
        let rules = [
            // JSON members: "albumin":"4.0" or "age": 45
            (
                format!(r#""({names})"\s*:\s*(?:"[^"]*"|[^,}}\s]+)"#),
                format!(r#""$1":"{REDACTED}""#),
            ),
            // Debug structs: albumin: "4.0"
            (
                format!(r#"\b({names})\s*:\s*"[^"]*""#),
                format!(r#"$1: "{REDACTED}""#),
            ),
            // key=value / key: value
            (
                format!(r#"\b({names})\s*([:=])\s*[^\s,;"}})]+"#),
                format!("$1$2{REDACTED}"),
            ),
        ];

        rules
            .into_iter()
            .map(|(pattern, replacement)| Redaction {
                regex: Regex::new(&pattern).expect("Valid regex"),
                replacement,
            })
            .collect()
    })
}

/// Replace every clinical value in `input` with a redaction marker.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    for rule in get_patterns() {
        if rule.regex.is_match(&result) {
            result = rule
                .regex
                .replace_all(&result, rule.replacement.as_str())
                .into_owned();
        }
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// Check whether a string carries any clinical value.
#[must_use]
pub fn contains_clinical_value(input: &str) -> bool {
    let (prefix, _) = truncate_to_char_boundary(input, max_sanitize_bytes());
    get_patterns()
        .iter()
        .any(|rule| rule.regex.find_iter(prefix).any(|m| !m.as_str().contains(REDACTED)))
}

/// A `tracing_subscriber` writer wrapper that sanitizes formatted log output
/// before it is written to the underlying sink.
#[derive(Debug)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M> Clone for SanitizingMakeWriter<M>
where
    M: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Line-buffered writer that redacts each complete line before passing it on.
pub struct SanitizingWriter<W> {
    inner: W,
    pending: Vec<u8>,
}

impl<W> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            pending: Vec::new(),
        }
    }
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn emit(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.inner
            .write_all(sanitize(&String::from_utf8_lossy(bytes)).as_bytes())
    }

    /// Emit every complete line; a trailing partial line stays pending.
    fn emit_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.emit(&line)?;
        }
        Ok(())
    }

    /// Emit whatever is pending, newline or not.
    fn emit_rest(&mut self) -> std::io::Result<()> {
        let rest = std::mem::take(&mut self.pending);
        if rest.is_empty() {
            return Ok(());
        }
        self.emit(&rest)
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.emit_lines()?;

        // Cap an unterminated line so it cannot grow without bound.
        if self.pending.len() > max_sanitize_bytes().saturating_mul(2) {
            self.emit_rest()?;
            self.inner.write_all(b"\n")?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.emit_lines()?;
        self.emit_rest()?;
        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}
