//! Line reconstruction from positioned PDF text fragments.
//!
//! PDF text extraction yields fragments with page coordinates, not lines.
//! Fragments whose baselines are within [`LINE_TOLERANCE`] units share a line.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Maximum baseline distance for two fragments to share a line.
pub const LINE_TOLERANCE: f64 = 4.0;

/// A run of text at a position on a page. `y` grows upwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    pub page: u32,
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Load fragments dumped as a JSON array.
pub fn fragments_from_json(raw: &str) -> Result<Vec<TextFragment>> {
    Ok(serde_json::from_str(raw)?)
}

struct Line<'a> {
    y: f64,
    items: Vec<(f64, &'a str)>,
}

/// Rebuild page text: lines top to bottom, fragments left to right joined by
/// a space, a blank line pair after every page.
pub fn reconstruct_text(fragments: &[TextFragment]) -> String {
    let mut pages: BTreeMap<u32, Vec<&TextFragment>> = BTreeMap::new();
    for fragment in fragments {
        pages.entry(fragment.page).or_default().push(fragment);
    }

    let mut text = String::new();
    for page in pages.values() {
        let mut lines: Vec<Line<'_>> = Vec::new();
        for fragment in page {
            if fragment.text.trim().is_empty() {
                continue;
            }
            match lines
                .iter_mut()
                .find(|line| (line.y - fragment.y).abs() < LINE_TOLERANCE)
            {
                Some(line) => line.items.push((fragment.x, fragment.text.as_str())),
                None => lines.push(Line {
                    y: fragment.y,
                    items: vec![(fragment.x, fragment.text.as_str())],
                }),
            }
        }

        lines.sort_by(|a, b| b.y.total_cmp(&a.y));
        for line in &mut lines {
            line.items.sort_by(|a, b| a.0.total_cmp(&b.0));
            let joined: Vec<&str> = line.items.iter().map(|(_, text)| *text).collect();
            text.push_str(&joined.join(" "));
            text.push('\n');
        }
        text.push_str("\n\n");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(page: u32, x: f64, y: f64, text: &str) -> TextFragment {
        TextFragment {
            page,
            x,
            y,
            text: text.to_string(),
        }
    }

    #[test]
    fn groups_by_baseline_and_orders_by_position() {
        let fragments = [
            fragment(1, 200.0, 700.0, "11/11/2024"),
            fragment(1, 50.0, 702.5, "Lundi"),
            fragment(1, 50.0, 720.0, "PLAN DE TRAVAIL"),
            fragment(1, 80.0, 690.0, "   "),
            fragment(1, 50.0, 680.0, "12 INT. CUISINE"),
        ];
        assert_eq!(
            reconstruct_text(&fragments),
            "PLAN DE TRAVAIL\nLundi 11/11/2024\n12 INT. CUISINE\n\n\n"
        );
    }

    #[test]
    fn tolerance_is_strict() {
        let fragments = [fragment(1, 0.0, 100.0, "a"), fragment(1, 0.0, 96.0, "b")];
        assert_eq!(reconstruct_text(&fragments), "a\nb\n\n\n");
    }

    #[test]
    fn pages_in_ascending_order() {
        let fragments = [fragment(2, 0.0, 10.0, "second"), fragment(1, 0.0, 10.0, "first")];
        assert_eq!(reconstruct_text(&fragments), "first\n\n\nsecond\n\n\n");
    }

    #[test]
    fn loads_json_dump() {
        let raw = r#"[{"page":1,"x":10.0,"y":700,"text":"Lundi"}]"#;
        let fragments = fragments_from_json(raw).unwrap();
        assert_eq!(fragments, [fragment(1, 10.0, 700.0, "Lundi")]);
        assert!(fragments_from_json("{").is_err());
    }
}
