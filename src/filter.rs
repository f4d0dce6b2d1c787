use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

static ORPHAN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)orphan").unwrap());

/// Lines following a marker line that belong to the same catalog entry.
/// Entries in the result markup span six lines total.
const ENTRY_TAIL_LINES: usize = 5;

/// Drop every orphan-marked entry block from the corpus.
///
/// Single forward pass: a line matching the orphan marker drops itself and
/// the next five lines, then scanning resumes after the block. No
/// re-matching happens inside a dropped block. A marker near the end of
/// input drops whatever lines remain. All surviving lines keep their
/// original order.
pub fn remove_orphan_blocks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut skip = 0usize;
    let mut dropped = 0usize;

    for line in text.lines() {
        if skip > 0 {
            skip -= 1;
            continue;
        }
        if ORPHAN_RE.is_match(line) {
            skip = ENTRY_TAIL_LINES;
            dropped += 1;
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }

    debug!("orphan filter dropped {} entries", dropped);
    out
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(s: &str) -> Vec<&str> {
        s.lines().collect()
    }

    #[test]
    fn drops_six_lines_per_marker() {
        let input = "keep1\nORPHAN here\na\nb\nc\nd\ne\nkeep2\n";
        let out = remove_orphan_blocks(input);
        assert_eq!(lines(&out), vec!["keep1", "keep2"]);
    }

    #[test]
    fn marker_match_is_case_insensitive() {
        let input = "x\nflagged as Orphan\n1\n2\n3\n4\n5\ny\n";
        let out = remove_orphan_blocks(input);
        assert_eq!(lines(&out), vec!["x", "y"]);
    }

    #[test]
    fn output_length_property() {
        // output lines = input lines - 6 * markers (no truncation here)
        let mut input = String::new();
        for i in 0..4 {
            input.push_str(&format!("entry{}\n", i));
            input.push_str("orphan\nt1\nt2\nt3\nt4\nt5\n");
        }
        let out = remove_orphan_blocks(&input);
        assert_eq!(lines(&out).len(), 4 + 4 * 6 - 4 * 6);
        assert_eq!(lines(&out), vec!["entry0", "entry1", "entry2", "entry3"]);
    }

    #[test]
    fn truncated_trailing_block_drops_rest() {
        let input = "keep\norphan\nonly\ntwo\n";
        let out = remove_orphan_blocks(input);
        assert_eq!(lines(&out), vec!["keep"]);
    }

    #[test]
    fn no_rematch_inside_dropped_block() {
        // The second marker sits inside the first block's tail and must not
        // extend the skip.
        let input = "orphan\na\norphan\nc\nd\ne\nsurvivor\n";
        let out = remove_orphan_blocks(input);
        assert_eq!(lines(&out), vec!["survivor"]);
    }

    #[test]
    fn untouched_without_markers() {
        let input = "a\nb\nc\n";
        assert_eq!(remove_orphan_blocks(input), input);
    }

    #[test]
    fn empty_input() {
        assert_eq!(remove_orphan_blocks(""), "");
    }
}
