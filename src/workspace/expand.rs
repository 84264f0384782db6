//! Workspace pattern expansion against the filesystem.

use crate::pattern::{PatternSegment, WorkspacePattern};
use crate::workspace::WORKSPACE_SKIP_DIRS;
use std::fs;
use std::path::{Path, PathBuf};

/// Expand include patterns from a root, segment by segment.
///
/// A directory is emitted when all pattern segments are consumed and it
/// contains a `package.json` file. Negated patterns do not expand; the
/// caller filters the union with them.
pub fn expand_patterns(root: &Path, patterns: &[WorkspacePattern]) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for pattern in patterns.iter().filter(|p| !p.is_negated()) {
        expand_into(root, pattern.segments(), &mut found);
    }
    found
}

fn expand_into(dir: &Path, segments: &[PatternSegment], out: &mut Vec<PathBuf>) {
    let Some((segment, rest)) = segments.split_first() else {
        if dir.join("package.json").is_file() {
            out.push(dir.to_path_buf());
        }
        return;
    };

    match segment {
        PatternSegment::Literal(name) => {
            let child = dir.join(name);
            if child.is_dir() {
                expand_into(&child, rest, out);
            }
        }
        PatternSegment::Wildcard(_) => {
            for child in matching_subdirs(dir, segment) {
                expand_into(&child, rest, out);
            }
        }
        PatternSegment::Globstar => {
            // Zero segments consumed
            expand_into(dir, rest, out);
            // One or more: descend, retrying the globstar at each level
            for child in matching_subdirs(dir, &PatternSegment::Globstar) {
                expand_into(&child, segments, out);
            }
        }
    }
}

fn matching_subdirs(dir: &Path, segment: &PatternSegment) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    entries
        .flatten()
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            !WORKSPACE_SKIP_DIRS.contains(&name.as_ref()) && segment.matches_segment(&name)
        })
        .map(|e| e.path())
        // is_dir follows symlinks; escapes are dropped later by the
        // real-path containment check
        .filter(|p| p.is_dir())
        .collect()
}
