//! Unique tag collection across albums.

use crate::errors::{Result, TagGraphError};
use crate::types::{TagList, TagSet};

/// Reduce a sequence of tag lists to the set of distinct tags.
///
/// Iteration order of the returned set is unspecified. A blank tag is a
/// malformed input and is rejected rather than skipped.
pub fn collect_unique_tags(tag_lists: &[TagList]) -> Result<TagSet> {
    let mut tags = TagSet::new();

    for (album, list) in tag_lists.iter().enumerate() {
        for tag in list {
            if tag.trim().is_empty() {
                return Err(TagGraphError::InvalidArgument(format!(
                    "blank tag in tag list {album}"
                )));
            }
            if !tags.contains(tag) {
                tags.insert(tag.clone());
            }
        }
    }

    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lists(raw: &[&[&str]]) -> Vec<TagList> {
        raw.iter()
            .map(|l| l.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_collects_all_distinct_tags() {
        let input = lists(&[&["a", "b"], &["b", "c"], &["c", "a", "d"], &["d", "b"]]);
        let tags = collect_unique_tags(&input).unwrap();
        let expected: TagSet = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(tags, expected);
    }

    #[test]
    fn test_completeness_and_size_bound() {
        let input = lists(&[&["thrash metal", "speed metal", "thrash metal"], &["doom metal"], &[]]);
        let tags = collect_unique_tags(&input).unwrap();
        let total: usize = input.iter().map(Vec::len).sum();
        assert!(tags.len() <= total);
        for tag in input.iter().flatten() {
            assert!(tags.contains(tag));
        }
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(collect_unique_tags(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_blank_tag_is_invalid() {
        let input = lists(&[&["black metal", " "]]);
        assert!(matches!(
            collect_unique_tags(&input),
            Err(TagGraphError::InvalidArgument(_))
        ));
    }
}
