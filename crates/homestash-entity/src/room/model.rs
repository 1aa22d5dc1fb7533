//! Room entity model and the letter-namespace helper.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use homestash_core::types::id::{RoomId, UserId};

/// The full letter namespace available to one user's rooms.
pub const ROOM_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A named physical room.
///
/// The letter is assigned lazily, the first time a storage cell is
/// allocated in the room; at most one letter per room and at most one
/// room per letter within a user's scope.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    /// Unique room identifier.
    pub id: RoomId,
    /// Owning user.
    pub user_id: UserId,
    /// Human-readable name.
    pub name: String,
    /// Assigned namespace letter (A-Z), if any cell has been allocated
    /// here yet. Stored as a single-character string.
    pub letter: Option<String>,
    /// When the room was created.
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// The assigned letter as a `char`, if any.
    pub fn letter_char(&self) -> Option<char> {
        self.letter.as_deref().and_then(|s| s.chars().next())
    }
}

/// Pick the lowest letter of A-Z not present in `taken`.
///
/// Returns `None` when the whole namespace is assigned, which the
/// caller surfaces as an exhausted-namespace error: 26 lettered rooms
/// per user is an explicit limit of the code scheme.
pub fn lowest_unused_letter(taken: &[char]) -> Option<char> {
    ROOM_LETTERS.chars().find(|c| !taken.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_room_gets_a() {
        assert_eq!(lowest_unused_letter(&[]), Some('A'));
    }

    #[test]
    fn skips_taken_letters() {
        assert_eq!(lowest_unused_letter(&['A', 'B']), Some('C'));
    }

    #[test]
    fn fills_holes_first() {
        assert_eq!(lowest_unused_letter(&['A', 'C']), Some('B'));
    }

    #[test]
    fn order_of_taken_letters_is_irrelevant() {
        assert_eq!(lowest_unused_letter(&['C', 'A', 'B']), Some('D'));
    }

    #[test]
    fn exhausted_after_twenty_six() {
        let all: Vec<char> = ROOM_LETTERS.chars().collect();
        assert_eq!(lowest_unused_letter(&all), None);
    }
}
