// Error types shared by the catalog loader, the game session and the UI

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// The catalog file could not be opened.
    #[error("cannot read movie catalog {}", path.display())]
    CatalogUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A session cannot start without at least one movie.
    #[error("movie catalog is empty")]
    EmptyCatalog,

    /// Terminal setup, drawing or event polling failed.
    #[error("terminal I/O error: {0}")]
    Terminal(#[from] io::Error),
}
