// Per-attribute feedback tiles derived from the selected movie

use crate::xtm_catalog::{MovieRecord, eq_ignore_case};

/// The six guessable attributes, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Title,
    Year,
    Genre,
    Origin,
    Director,
    Star,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Title,
        Attribute::Year,
        Attribute::Genre,
        Attribute::Origin,
        Attribute::Director,
        Attribute::Star,
    ];

    /// Label shown on the tile
    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Title => "Title",
            Attribute::Year => "Year",
            Attribute::Genre => "Genre",
            Attribute::Origin => "Origin",
            Attribute::Director => "Director",
            Attribute::Star => "Star",
        }
    }

    /// Read this attribute from a movie
    pub fn value_of<'a>(&self, movie: &'a MovieRecord) -> &'a str {
        match self {
            Attribute::Title => movie.title(),
            Attribute::Year => movie.year(),
            Attribute::Genre => movie.genre(),
            Attribute::Origin => movie.origin(),
            Attribute::Director => movie.director(),
            Attribute::Star => movie.star(),
        }
    }
}

/// One rendered tile: label, value of the selected movie, match flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeFeedback {
    pub attribute: Attribute,
    pub value: String,
    pub matched: bool,
}

impl AttributeFeedback {
    pub fn label(&self) -> &'static str {
        self.attribute.label()
    }
}

/// How tiles decide their match flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchRule {
    /// Tiles are never flagged as matched
    #[default]
    Never,
    /// Each tile is compared against the target's attribute, ignoring case
    Attribute,
}

impl MatchRule {
    pub fn from_highlight(highlight_matches: bool) -> Self {
        if highlight_matches {
            MatchRule::Attribute
        } else {
            MatchRule::Never
        }
    }

    pub fn feedback(&self, selected: &MovieRecord, target: &MovieRecord) -> Vec<AttributeFeedback> {
        match self {
            MatchRule::Never => derive_feedback(selected),
            MatchRule::Attribute => compare_feedback(selected, target),
        }
    }
}

/// Tiles for the selected movie, none of them matched
pub fn derive_feedback(selected: &MovieRecord) -> Vec<AttributeFeedback> {
    Attribute::ALL
        .iter()
        .map(|a| AttributeFeedback {
            attribute: *a,
            value: a.value_of(selected).to_string(),
            matched: false,
        })
        .collect()
}

/// Tiles for the selected movie, each flagged when it equals the target's attribute
pub fn compare_feedback(selected: &MovieRecord, target: &MovieRecord) -> Vec<AttributeFeedback> {
    Attribute::ALL
        .iter()
        .map(|a| AttributeFeedback {
            attribute: *a,
            value: a.value_of(selected).to_string(),
            matched: eq_ignore_case(a.value_of(selected), a.value_of(target)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inception() -> MovieRecord {
        MovieRecord::new("Inception", "2010", "Sci-Fi", "USA", "Christopher Nolan", "Leonardo DiCaprio")
    }

    fn interstellar() -> MovieRecord {
        MovieRecord::new("Interstellar", "2014", "sci-fi", "UK", "Christopher Nolan", "Matthew McConaughey")
    }

    #[test]
    fn test_derive_feedback_order_and_values() {
        let tiles = derive_feedback(&inception());
        let labels: Vec<&str> = tiles.iter().map(|t| t.label()).collect();
        assert_eq!(labels, ["Title", "Year", "Genre", "Origin", "Director", "Star"]);
        assert_eq!(tiles[0].value, "Inception");
        assert_eq!(tiles[4].value, "Christopher Nolan");
    }

    #[test]
    fn test_derive_feedback_never_matched() {
        let tiles = derive_feedback(&inception());
        assert_eq!(tiles.len(), 6);
        assert!(tiles.iter().all(|t| !t.matched));
    }

    #[test]
    fn test_derive_feedback_blank_fields() {
        let tiles = derive_feedback(&MovieRecord::new("Heat", "", "", "", "", ""));
        assert_eq!(tiles.len(), 6);
        assert_eq!(tiles[1].value, "");
    }

    #[test]
    fn test_compare_feedback_flags_equal_attributes() {
        let tiles = compare_feedback(&interstellar(), &inception());
        let flags: Vec<bool> = tiles.iter().map(|t| t.matched).collect();
        assert_eq!(flags, [false, false, true, false, true, false]);
        // values come from the selected movie, not the target
        assert_eq!(tiles[0].value, "Interstellar");
        assert_eq!(tiles[2].value, "sci-fi");
    }

    #[test]
    fn test_match_rule_dispatch() {
        let a = inception();
        assert!(MatchRule::Never.feedback(&a, &a).iter().all(|t| !t.matched));
        assert!(MatchRule::Attribute.feedback(&a, &a).iter().all(|t| t.matched));
        assert_eq!(MatchRule::from_highlight(false), MatchRule::Never);
        assert_eq!(MatchRule::from_highlight(true), MatchRule::Attribute);
    }
}
