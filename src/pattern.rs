//! Path pattern normalization and matching.
//!
//! Config patterns (`alwaysDelete` / `neverDelete`) are canonical
//! POSIX-slashed relative paths matched by segment prefix. Workspace
//! patterns additionally support `*` / `?` / `**` segment wildcards and a
//! leading `!` negation marker.

use regex::Regex;

/// Normalize a config path pattern into canonical POSIX form.
///
/// Returns `None` for inputs that are empty after normalization, escape
/// upward (`..`), or carry a Windows drive prefix.
pub fn normalize_path_pattern(value: &str) -> Option<String> {
    normalize(value, false)
}

/// Like [`normalize_path_pattern`] but maps an empty result to `Some("")`.
///
/// Used when normalizing relative paths for matching, where the scan root
/// itself legitimately normalizes to the empty string.
pub fn normalize_path_pattern_allow_empty(value: &str) -> Option<String> {
    normalize(value, true)
}

fn normalize(value: &str, allow_empty: bool) -> Option<String> {
    let mut s: String = value.trim().replace('\\', "/");

    while s.starts_with("./") {
        s.drain(..2);
    }
    s = s.trim_start_matches('/').to_string();

    // Collapse runs of slashes
    while s.contains("//") {
        s = s.replace("//", "/");
    }
    s = s.trim_end_matches('/').to_string();

    if s.is_empty() || s == "." {
        return if allow_empty { Some(String::new()) } else { None };
    }

    let s = lexical_normalize(&s);

    if s.is_empty() || s == "." {
        return if allow_empty { Some(String::new()) } else { None };
    }

    // Upward traversal survives lexical normalization only at the front
    if s == ".." || s.starts_with("../") || s.contains("/../") {
        return None;
    }
    if has_drive_prefix(&s) {
        return None;
    }

    Some(s)
}

/// Purely lexical POSIX normalization: drops `.` segments and resolves
/// `..` against preceding segments without touching the filesystem.
fn lexical_normalize(path: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(stack.last(), Some(&last) if last != "..") {
                    stack.pop();
                } else {
                    stack.push("..");
                }
            }
            other => stack.push(other),
        }
    }
    stack.join("/")
}

fn has_drive_prefix(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/'
}

/// Normalize a workspace pattern, preserving a leading `!` negation marker.
pub fn normalize_workspace_pattern(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if let Some(inner) = trimmed.strip_prefix('!') {
        normalize(inner, false).map(|p| format!("!{}", p))
    } else {
        normalize(trimmed, false)
    }
}

/// Segment-prefix match of a relative path against a config pattern.
///
/// `a/b` matches patterns `a` and `a/b` but not `a/bc`. Not a glob.
pub fn matches_config_pattern(relative_path: &str, pattern: &str) -> bool {
    let rel = match normalize_path_pattern_allow_empty(relative_path) {
        Some(r) => r,
        None => return false,
    };
    let pat = match normalize_path_pattern(pattern) {
        Some(p) => p,
        None => return false,
    };
    rel == pat || rel.starts_with(&format!("{}/", pat))
}

/// One compiled segment of a workspace pattern.
#[derive(Debug, Clone)]
pub enum PatternSegment {
    /// Exact directory name.
    Literal(String),
    /// Single segment containing `*` / `?` wildcards.
    Wildcard(Regex),
    /// `**`: any number of path segments, including zero.
    Globstar,
}

impl PatternSegment {
    fn compile(segment: &str) -> Self {
        if segment == "**" {
            PatternSegment::Globstar
        } else if segment.contains('*') || segment.contains('?') {
            PatternSegment::Wildcard(wildcard_regex(segment))
        } else {
            PatternSegment::Literal(segment.to_string())
        }
    }

    /// Match a single path segment. `Globstar` is handled by the walker.
    pub fn matches_segment(&self, name: &str) -> bool {
        match self {
            PatternSegment::Literal(lit) => lit == name,
            PatternSegment::Wildcard(re) => re.is_match(name),
            PatternSegment::Globstar => true,
        }
    }
}

/// Translate a wildcard segment to an anchored regex: `*` matches any run
/// of non-separator characters, `?` exactly one.
fn wildcard_regex(segment: &str) -> Regex {
    let mut pattern = String::with_capacity(segment.len() + 8);
    pattern.push('^');
    for ch in segment.chars() {
        match ch {
            '*' => pattern.push_str("[^/]*"),
            '?' => pattern.push_str("[^/]"),
            other => pattern.push_str(&regex::escape(&other.to_string())),
        }
    }
    pattern.push('$');
    // The alphabet is fixed, so compilation cannot fail
    Regex::new(&pattern).expect("wildcard segment regex")
}

/// A workspace pattern compiled for repeated matching.
#[derive(Debug, Clone)]
pub struct WorkspacePattern {
    negated: bool,
    segments: Vec<PatternSegment>,
}

impl WorkspacePattern {
    /// Normalize and compile a pattern. Returns `None` for patterns the
    /// normalizer rejects.
    pub fn parse(pattern: &str) -> Option<Self> {
        let normalized = normalize_workspace_pattern(pattern)?;
        let (negated, body) = match normalized.strip_prefix('!') {
            Some(inner) => (true, inner),
            None => (false, normalized.as_str()),
        };
        let segments = body
            .split('/')
            .filter(|s| !s.is_empty())
            .map(PatternSegment::compile)
            .collect();
        Some(Self { negated, segments })
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    /// Match a relative path. A negated pattern matches exactly when its
    /// body does not.
    pub fn matches(&self, relative_path: &str) -> bool {
        let normalized = relative_path.trim().replace('\\', "/");
        let parts: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
        let hit = match_segments(&self.segments, &parts);
        if self.negated {
            !hit
        } else {
            hit
        }
    }
}

fn match_segments(segments: &[PatternSegment], parts: &[&str]) -> bool {
    match segments.split_first() {
        None => parts.is_empty(),
        Some((PatternSegment::Globstar, rest)) => {
            if rest.is_empty() {
                // Trailing ** swallows the remainder
                return true;
            }
            (0..=parts.len()).any(|skip| match_segments(rest, &parts[skip..]))
        }
        Some((segment, rest)) => match parts.split_first() {
            None => false,
            Some((part, part_rest)) => {
                segment.matches_segment(part) && match_segments(rest, part_rest)
            }
        },
    }
}

/// Segment-wise glob match of a relative path against a workspace pattern.
pub fn matches_workspace_pattern(relative_path: &str, pattern: &str) -> bool {
    match WorkspacePattern::parse(pattern) {
        Some(compiled) => compiled.matches(relative_path),
        None => false,
    }
}
