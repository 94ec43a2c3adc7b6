//! Marker-region stripping for source text.
//!
//! Removes every contiguous region delimited by the configured start/end
//! token pair. The transform is pure and the output is never longer than
//! the input.

use crate::config::RedactionTokens;

/// Result of stripping marked regions from one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripOutcome {
    /// The text with all well-formed marked regions removed.
    pub text: String,

    /// Number of regions removed.
    pub regions_removed: usize,

    /// A start token with no following end token was encountered.
    ///
    /// The remainder of the text after that token was copied through
    /// unchanged. This is a content-quality issue for the file's author,
    /// not an export failure, but it means text after the unterminated
    /// marker ships unredacted.
    pub unterminated: bool,
}

impl StripOutcome {
    /// Returns `true` if any region was removed.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.regions_removed > 0
    }
}

/// Removes all marked regions from `src`.
///
/// Scans left to right. On finding the start token, the nearest end token
/// after it closes the region; the span from the start token through the
/// end of the end token (inclusive) is deleted and scanning resumes after
/// it. A start token with no following end token is preserved along with
/// the remainder of the text. Regions never nest: while a region is open,
/// further start tokens are ordinary text inside the span and are deleted
/// with it.
///
/// Deleting a region splices its surrounding text together, and when the
/// text on either side holds partial tokens the splice can form a new
/// start token that a single pass does not see (`"x//[" + region + "[..."`
/// leaves `"x//[["` behind). Such residue ships unredacted, like the text
/// after an unterminated start token; marker authors should not split
/// token characters around a region.
///
/// # Examples
///
/// ```
/// use distpack_core::RedactionTokens;
/// use distpack_core::strip::strip_marked_regions;
///
/// let tokens = RedactionTokens::default();
/// let out = strip_marked_regions("keep //[[ secret //]] also keep", &tokens);
/// assert_eq!(out.text, "keep  also keep");
/// assert_eq!(out.regions_removed, 1);
/// assert!(!out.unterminated);
/// ```
#[must_use]
pub fn strip_marked_regions(src: &str, tokens: &RedactionTokens) -> StripOutcome {
    let start = tokens.region_start.as_str();
    let end = tokens.region_end.as_str();

    // Empty tokens would match everywhere; treat them as absent.
    if start.is_empty() || end.is_empty() {
        return StripOutcome {
            text: src.to_string(),
            regions_removed: 0,
            unterminated: false,
        };
    }

    let mut out = String::with_capacity(src.len());
    let mut cursor = 0;
    let mut regions_removed = 0;
    let mut unterminated = false;

    while cursor < src.len() {
        let Some(open) = src[cursor..].find(start).map(|i| cursor + i) else {
            // No more markers.
            out.push_str(&src[cursor..]);
            break;
        };

        out.push_str(&src[cursor..open]);

        let after_start = open + start.len();
        match src[after_start..].find(end).map(|i| after_start + i) {
            Some(close) => {
                // Drop everything through the end token and resume after it.
                cursor = close + end.len();
                regions_removed += 1;
            }
            None => {
                // Unmatched start token: keep the remainder verbatim.
                out.push_str(&src[open..]);
                unterminated = true;
                break;
            }
        }
    }

    StripOutcome {
        text: out,
        regions_removed,
        unterminated,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tokens() -> RedactionTokens {
        RedactionTokens::default()
    }

    #[test]
    fn test_no_markers_returns_input_unchanged() {
        let src = "fn main() {\n    println!(\"hello\");\n}\n";
        let out = strip_marked_regions(src, &tokens());
        assert_eq!(out.text, src);
        assert_eq!(out.regions_removed, 0);
        assert!(!out.unterminated);
    }

    #[test]
    fn test_single_region_removed() {
        let src = "before //[[ answer = 42 //]] after";
        let out = strip_marked_regions(src, &tokens());
        assert_eq!(out.text, "before  after");
        assert_eq!(out.regions_removed, 1);
    }

    #[test]
    fn test_multiple_regions_all_removed() {
        let src = "a //[[ one //]] b //[[ two //]] c //[[ three //]] d";
        let out = strip_marked_regions(src, &tokens());
        assert_eq!(out.text, "a  b  c  d");
        assert_eq!(out.regions_removed, 3);
    }

    #[test]
    fn test_multiline_region() {
        let src = "fn visible() {}\n//[[\nfn hidden() {\n    let answer = 42;\n}\n//]]\nfn also_visible() {}\n";
        let out = strip_marked_regions(src, &tokens());
        assert_eq!(out.text, "fn visible() {}\n\nfn also_visible() {}\n");
        assert!(!out.text.contains("answer"));
        assert!(!out.text.contains("//[["));
        assert!(!out.text.contains("//]]"));
    }

    #[test]
    fn test_unmatched_start_keeps_remainder() {
        let src = "kept //[[ everything after stays";
        let out = strip_marked_regions(src, &tokens());
        assert_eq!(out.text, src);
        assert_eq!(out.regions_removed, 0);
        assert!(out.unterminated);
    }

    #[test]
    fn test_unmatched_start_after_closed_region() {
        let src = "a //[[ gone //]] b //[[ dangling";
        let out = strip_marked_regions(src, &tokens());
        assert_eq!(out.text, "a  b //[[ dangling");
        assert_eq!(out.regions_removed, 1);
        assert!(out.unterminated);
    }

    #[test]
    fn test_nested_start_token_deleted_with_span() {
        // A second start token before the close is ordinary text inside
        // the open region.
        let src = "a //[[ outer //[[ inner //]] b";
        let out = strip_marked_regions(src, &tokens());
        assert_eq!(out.text, "a  b");
        assert_eq!(out.regions_removed, 1);
    }

    #[test]
    fn test_end_token_without_start_is_plain_text() {
        let src = "no region here //]] still here";
        let out = strip_marked_regions(src, &tokens());
        assert_eq!(out.text, src);
        assert_eq!(out.regions_removed, 0);
    }

    #[test]
    fn test_region_at_start_and_end_of_text() {
        let src = "//[[ head //]]middle//[[ tail //]]";
        let out = strip_marked_regions(src, &tokens());
        assert_eq!(out.text, "middle");
        assert_eq!(out.regions_removed, 2);
    }

    #[test]
    fn test_adjacent_tokens_empty_region() {
        let src = "x//[[//]]y";
        let out = strip_marked_regions(src, &tokens());
        assert_eq!(out.text, "xy");
        assert_eq!(out.regions_removed, 1);
    }

    #[test]
    fn test_idempotent() {
        let src = "a //[[ one //]] b //[[ dangling";
        let once = strip_marked_regions(src, &tokens());
        let twice = strip_marked_regions(&once.text, &tokens());
        assert_eq!(once.text, twice.text);
    }

    #[test]
    fn test_splice_leaves_new_start_token_for_next_pass() {
        // Removing the region joins "x//[" and "[ B //]]." into a fresh
        // start token; one pass leaves that residue, a second removes it.
        let src = "x//[//[[A//]][ B //]].";
        let once = strip_marked_regions(src, &tokens());
        assert_eq!(once.text, "x//[[ B //]].");
        assert_eq!(once.regions_removed, 1);
        let twice = strip_marked_regions(&once.text, &tokens());
        assert_eq!(twice.text, "x.");
    }

    #[test]
    fn test_empty_input() {
        let out = strip_marked_regions("", &tokens());
        assert_eq!(out.text, "");
        assert_eq!(out.regions_removed, 0);
        assert!(!out.unterminated);
    }

    #[test]
    fn test_custom_tokens() {
        let custom = RedactionTokens {
            region_start: "<!--hide".to_string(),
            region_end: "-->".to_string(),
            ..RedactionTokens::default()
        };
        let src = "keep <!--hide secret --> keep";
        let out = strip_marked_regions(src, &custom);
        assert_eq!(out.text, "keep  keep");
    }

    #[test]
    fn test_output_never_longer_than_input() {
        let src = "a //[[ x //]] b //[[ y //]] c //[[ unterminated";
        let out = strip_marked_regions(src, &tokens());
        assert!(out.text.len() <= src.len());
    }
}
