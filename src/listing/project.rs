//! Project identity parsed from the project root folder name.
//!
//! Root folders are named `PPPPPPRRR?NAME-NUMBER`: a six-character prefix,
//! a three-character rank, one separator, then the project name and the
//! project number after the last `-`.

use crate::error::{Error, Result};

/// Characters before the rank.
const PREFIX_LEN: usize = 6;

/// Characters in the rank.
const RANK_LEN: usize = 3;

/// Rank, name and number of the project being listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectIdentity {
    /// Filing rank ("Classement")
    pub rank: String,
    /// Site name ("Poste de ...")
    pub name: String,
    /// Project number ("Affaire N°")
    pub number: String,
}

impl ProjectIdentity {
    /// Parse a project root folder name.
    pub fn parse(folder: &str) -> Result<Self> {
        let malformed = |reason: &str| Error::MalformedProjectName {
            folder: folder.to_string(),
            reason: reason.to_string(),
        };

        let chars: Vec<char> = folder.chars().collect();
        if chars.len() <= PREFIX_LEN + RANK_LEN {
            return Err(malformed("too short to hold the prefix, rank and separator"));
        }

        let rank: String = chars[PREFIX_LEN..PREFIX_LEN + RANK_LEN].iter().collect();
        let rest: String = chars[PREFIX_LEN + RANK_LEN + 1..].iter().collect();

        let (name, number) = rest
            .rsplit_once('-')
            .ok_or_else(|| malformed("no '-' between the project name and number"))?;

        Ok(Self {
            rank,
            name: name.to_string(),
            number: number.to_string(),
        })
    }

    /// Identity used when the folder name cannot be parsed: the whole folder
    /// name as the project name.
    pub fn fallback(folder: &str) -> Self {
        Self {
            name: folder.to_string(),
            ..Default::default()
        }
    }

    /// Parse, or fall back to [`ProjectIdentity::fallback`] and hand back the
    /// parse error for reporting.
    pub fn parse_or_fallback(folder: &str) -> (Self, Option<Error>) {
        match Self::parse(folder) {
            Ok(identity) => (identity, None),
            Err(e) => (Self::fallback(folder), Some(e)),
        }
    }
}
