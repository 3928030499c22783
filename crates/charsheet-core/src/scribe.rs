//! Sheet writer

use std::path::Path;

use tracing::{error, info};

use crate::character::Character;
use crate::error::SheetError;

/// Writes character sheets to disk under an author header
#[derive(Debug, Clone, Copy, Default)]
pub struct Scribe;

impl Scribe {
    /// Header line written above every sheet
    pub fn header(author_id: &str) -> String {
        format!("Student ID: {}\n", author_id)
    }

    /// Write the header and `contents` to `path`, replacing any existing file
    pub fn try_write_to_file(
        path: impl AsRef<Path>,
        contents: &str,
        author_id: &str,
    ) -> Result<(), SheetError> {
        let path = path.as_ref();
        let mut text = Self::header(author_id);
        text.push_str(contents);
        std::fs::write(path, text)?;
        info!(path = %path.display(), bytes = contents.len(), "wrote character sheet");
        Ok(())
    }

    /// Like [`Scribe::try_write_to_file`], but a failure is logged and
    /// reported as `false`
    pub fn write_to_file(path: impl AsRef<Path>, contents: &str, author_id: &str) -> bool {
        let path = path.as_ref();
        match Self::try_write_to_file(path, contents, author_id) {
            Ok(()) => true,
            Err(e) => {
                error!(path = %path.display(), error = %e, "could not write character sheet");
                false
            }
        }
    }

    /// Write a character's sheet
    pub fn write_character(
        path: impl AsRef<Path>,
        character: &Character,
        author_id: &str,
    ) -> Result<(), SheetError> {
        Self::try_write_to_file(path, &character.to_string(), author_id)
    }
}
