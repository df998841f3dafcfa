//! Tag list extraction from album rows.

use crate::dataset::tag_literal::parse_tag_literal;
use crate::errors::{Result, TagGraphError};
use crate::types::{AlbumRecord, TagList};

/// Parse the tag field of every row that has one.
///
/// Rows whose tag field is absent or an empty cell are skipped, not replaced
/// by an empty list. Any other text must be a valid list literal; the first
/// row that fails to parse aborts the extraction.
pub fn extract_tag_lists(records: &[AlbumRecord]) -> Result<Vec<TagList>> {
    let mut out = Vec::with_capacity(records.len());

    for (row, record) in records.iter().enumerate() {
        let Some(raw) = record.tags.as_deref() else {
            continue;
        };
        if raw.is_empty() {
            continue;
        }
        let tags = parse_tag_literal(raw).map_err(|reason| TagGraphError::Parse { row, reason })?;
        out.push(tags);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(album: &str, tags: Option<&str>) -> AlbumRecord {
        AlbumRecord {
            artist: "Blind Guardian".into(),
            album: album.into(),
            tags: tags.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_skips_missing_rows() {
        let records = vec![
            record("Imaginations from the Other Side", Some("['power metal', 'speed metal']")),
            record("Somewhere Far Beyond", None),
            record("Tales from the Twilight World", Some("")),
            record("Nightfall in Middle-Earth", Some("[]")),
        ];
        let lists = extract_tag_lists(&records).unwrap();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0], vec!["power metal", "speed metal"]);
        assert!(lists[1].is_empty());
    }

    #[test]
    fn test_parse_failure_reports_row() {
        let records = vec![
            record("A Night at the Opera", Some("['power metal']")),
            record("At the Edge of Time", Some("power metal")),
        ];
        match extract_tag_lists(&records) {
            Err(TagGraphError::Parse { row, .. }) => assert_eq!(row, 1),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_whitespace_field_is_malformed() {
        let records = vec![
            record("Battalions of Fear", None),
            record("Follow the Blind", Some("  ")),
        ];
        match extract_tag_lists(&records) {
            Err(TagGraphError::Parse { row, .. }) => assert_eq!(row, 1),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
