// ABOUTME: Filename sanitization to prevent path traversal on migration-file reads
// ABOUTME: Strips every character outside the [A-Za-z0-9_.-] allow-list
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Path sanitization
//!
//! Any externally supplied string that will address a file under a trusted
//! base directory must pass through [`sanitize_filename`] first. The
//! allow-list excludes path separators entirely, so `..` sequences are
//! rendered harmless: dots alone cannot escape a directory.
//!
//! The sanitizer does not check that the result names an existing file, nor
//! that it is non-empty; callers reject empty results and enforce the
//! expected suffix before constructing any path.

/// Strip `raw` down to the `[A-Za-z0-9_.-]` allow-list
///
/// Pure and deterministic; idempotent by construction.
#[must_use]
pub fn sanitize_filename(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect()
}
