// Movie records and the read-only catalog loaded at startup
// Parses the semicolon-delimited catalog file and picks random targets

use rand::Rng;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{error, info, trace, warn};

use crate::xtm_error::GameError;

/// Minimum field count for a catalog line (rank column + six attributes)
const MIN_FIELDS: usize = 7;

/// A single movie with the six guessable attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    title: String,
    year: String,
    genre: String,
    origin: String,
    director: String,
    star: String,
}

impl MovieRecord {
    pub fn new(
        title: impl Into<String>,
        year: impl Into<String>,
        genre: impl Into<String>,
        origin: impl Into<String>,
        director: impl Into<String>,
        star: impl Into<String>,
    ) -> Self {
        MovieRecord {
            title: title.into(),
            year: year.into(),
            genre: genre.into(),
            origin: origin.into(),
            director: director.into(),
            star: star.into(),
        }
    }

    /// Build a record from one catalog line
    /// Returns None if the line has fewer than seven fields
    pub fn from_line(line: &str) -> Option<Self> {
        let mut fields: Vec<&str> = line.split(';').collect();
        // trailing empty fields do not count towards the minimum
        while fields.last() == Some(&"") {
            fields.pop();
        }
        if fields.len() < MIN_FIELDS {
            return None;
        }
        // field 0 is the rank column, not used by the game
        Some(MovieRecord::new(
            fields[1].trim(),
            fields[2].trim(),
            fields[3].trim(),
            fields[4].trim(),
            fields[5].trim(),
            fields[6].trim(),
        ))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn director(&self) -> &str {
        &self.director
    }

    pub fn star(&self) -> &str {
        &self.star
    }

    /// Case-insensitive exact comparison against this movie's title
    pub fn title_matches(&self, guess: &str) -> bool {
        eq_ignore_case(&self.title, guess)
    }
}

/// Unicode-aware case-insensitive string equality
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Ordered, read-only list of movies (file order)
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
}

impl Catalog {
    pub fn from_movies(movies: Vec<MovieRecord>) -> Self {
        Catalog { movies }
    }

    /// Parse catalog lines from any buffered reader
    /// Malformed lines are skipped; a read error stops parsing and keeps what was read
    pub fn parse<R: BufRead>(reader: R) -> Self {
        let mut movies = Vec::new();
        for (n, line) in reader.lines().enumerate() {
            match line {
                Ok(line) => match MovieRecord::from_line(&line) {
                    Some(movie) => movies.push(movie),
                    None => trace!(line = n + 1, "skipping malformed catalog line"),
                },
                Err(e) => {
                    warn!(line = n + 1, error = %e, "stopped reading catalog");
                    break;
                }
            }
        }
        Catalog { movies }
    }

    /// Load the catalog from a file
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let file = File::open(path).map_err(|source| GameError::CatalogUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Catalog::parse(BufReader::new(file));
        info!(path = %path.display(), movies = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Load the catalog, logging and returning an empty catalog if the file is unreadable
    pub fn load_or_empty(path: &Path) -> Self {
        Catalog::load(path).unwrap_or_else(|e| {
            error!(error = ?e, "{}", e);
            Catalog::default()
        })
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MovieRecord> {
        self.movies.get(index)
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// Uniformly pick a catalog index, None if the catalog is empty
    pub fn pick_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.movies.is_empty() {
            None
        } else {
            Some(rng.gen_range(0..self.movies.len()))
        }
    }

    /// Uniformly pick a movie, None if the catalog is empty
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&MovieRecord> {
        self.pick_index(rng).and_then(|i| self.get(i))
    }

    /// Index of the first movie (catalog order) whose title matches case-insensitively
    pub fn find_by_title(&self, title: &str) -> Option<usize> {
        self.movies.iter().position(|m| m.title_matches(title))
    }
}
