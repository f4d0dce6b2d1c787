use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Anchor to a package detail page; the link text is the display name.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a\s+href="/packages/[^"]+">([^<]+)</a>"#).unwrap());

/// Pull one package name per matching entry line, in document order.
///
/// Lines without a detail-page anchor are skipped; most of the corpus is
/// non-entry markup. The capture is taken verbatim, no trimming. Duplicates
/// pass through untouched: pages are disjoint offset windows, so a repeat
/// would mean a pagination bug upstream.
pub fn extract_names(text: &str) -> Vec<String> {
    let names: Vec<String> = text
        .lines()
        .filter_map(|line| NAME_RE.captures(line))
        .map(|caps| caps[1].to_string())
        .collect();
    debug!("extracted {} package names", names.len());
    names
}

// ── Tests ──
