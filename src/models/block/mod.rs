// Block module
// A scheduled occupancy of one room for a contiguous time range on one day

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::day::Day;

/// Opaque block identity, assigned by the remote store on creation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub String);

impl BlockId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        BlockId(s.to_string())
    }
}

/// A scheduled block: one room, one day, a half-open minute interval
/// `[start_min, end_min)`, plus label text and structured fields.
///
/// `text` is the display label. When it is empty the label is derived from
/// the structured fields (see [`Block::display_text`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// None until the remote store has assigned an identity.
    pub id: Option<BlockId>,
    pub day: Day,
    pub room_index: usize,
    /// Minutes from midnight.
    pub start_min: i32,
    /// Minutes from midnight; exclusive.
    pub end_min: i32,
    /// Free-form label. Empty means "derive from structured fields".
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub modality: String,
    #[serde(default)]
    pub note: String,
}

impl Block {
    /// Create a block with required placement fields.
    pub fn new(day: Day, room_index: usize, start_min: i32, end_min: i32) -> Result<Self, String> {
        if end_min <= start_min {
            return Err("Block end time must be after start time".to_string());
        }
        Ok(Self {
            id: None,
            day,
            room_index,
            start_min,
            end_min,
            text: String::new(),
            group: String::new(),
            instructor: String::new(),
            modality: String::new(),
            note: String::new(),
        })
    }

    /// Create a builder for constructing blocks with optional fields.
    pub fn builder() -> BlockBuilder {
        BlockBuilder::new()
    }

    /// Structural field validation. Placement legality against the grid and
    /// other blocks is the conflict validator's job, not this one's.
    pub fn validate(&self) -> Result<(), String> {
        if self.end_min <= self.start_min {
            return Err("Block end time must be after start time".to_string());
        }
        if self.display_text().is_empty() {
            return Err("Block needs a label: set text or a structured field".to_string());
        }
        Ok(())
    }

    /// Duration in minutes; held constant through a drag.
    pub fn duration_min(&self) -> i32 {
        self.end_min - self.start_min
    }

    /// The label to render: the explicit text when present, otherwise the
    /// one-way projection of the structured fields.
    pub fn display_text(&self) -> String {
        let trimmed = self.text.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
        compose_text(&self.group, &self.instructor, &self.modality, &self.note)
    }

    /// Secondary line for list views: instructor, modality, note.
    pub fn meta_line(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        let instructor = self.instructor.trim();
        let modality = self.modality.trim();
        let note = self.note.trim();
        if !instructor.is_empty() {
            parts.push(instructor);
        }
        if !modality.is_empty() {
            parts.push(modality);
        }
        if !note.is_empty() {
            parts.push(note);
        }
        parts.join(" · ")
    }

    /// Same fields, no identity, new placement. The copy-drop payload.
    pub fn copied_to(&self, room_index: usize, start_min: i32, end_min: i32) -> Block {
        Block {
            id: None,
            room_index,
            start_min,
            end_min,
            ..self.clone()
        }
    }

    /// Same identity and fields, new placement. The move-drop payload.
    pub fn moved_to(&self, room_index: usize, start_min: i32, end_min: i32) -> Block {
        Block {
            room_index,
            start_min,
            end_min,
            ..self.clone()
        }
    }
}

/// One-way projection of structured fields into a display label.
/// Suppressed in the dialog once the operator edits the text by hand.
pub fn compose_text(group: &str, instructor: &str, modality: &str, note: &str) -> String {
    [group, instructor, modality, note]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" · ")
}

/// Builder for creating blocks with optional fields
pub struct BlockBuilder {
    day: Option<Day>,
    room_index: Option<usize>,
    start_min: Option<i32>,
    end_min: Option<i32>,
    text: String,
    group: String,
    instructor: String,
    modality: String,
    note: String,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            day: None,
            room_index: None,
            start_min: None,
            end_min: None,
            text: String::new(),
            group: String::new(),
            instructor: String::new(),
            modality: String::new(),
            note: String::new(),
        }
    }

    pub fn day(mut self, day: Day) -> Self {
        self.day = Some(day);
        self
    }

    pub fn room_index(mut self, room_index: usize) -> Self {
        self.room_index = Some(room_index);
        self
    }

    pub fn start_min(mut self, start_min: i32) -> Self {
        self.start_min = Some(start_min);
        self
    }

    pub fn end_min(mut self, end_min: i32) -> Self {
        self.end_min = Some(end_min);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }

    pub fn modality(mut self, modality: impl Into<String>) -> Self {
        self.modality = modality.into();
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn build(self) -> Result<Block, String> {
        let day = self.day.ok_or("Block day is required")?;
        let room_index = self.room_index.ok_or("Block room is required")?;
        let start_min = self.start_min.ok_or("Block start time is required")?;
        let end_min = self.end_min.ok_or("Block end time is required")?;

        let block = Block {
            id: None,
            day,
            room_index,
            start_min,
            end_min,
            text: self.text,
            group: self.group,
            instructor: self.instructor,
            modality: self.modality,
            note: self.note,
        };

        block.validate()?;
        Ok(block)
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_block() -> Block {
        Block::builder()
            .day(Day::Monday)
            .room_index(2)
            .start_min(600)
            .end_min(660)
            .group("Choir A")
            .instructor("Riley")
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_rejects_inverted_interval() {
        assert!(Block::new(Day::Monday, 0, 660, 600).is_err());
        assert!(Block::new(Day::Monday, 0, 600, 600).is_err());
    }

    #[test]
    fn test_builder_requires_placement() {
        let result = Block::builder().day(Day::Friday).text("Piano").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_needs_some_label() {
        let block = Block::new(Day::Monday, 1, 600, 630).unwrap();
        assert!(block.validate().is_err());

        let mut labeled = block.clone();
        labeled.text = "Solo practice".to_string();
        assert!(labeled.validate().is_ok());

        let mut structured = block;
        structured.instructor = "Sam".to_string();
        assert!(structured.validate().is_ok());
    }

    #[test]
    fn test_display_text_prefers_explicit() {
        let mut block = sample_block();
        assert_eq!(block.display_text(), "Choir A · Riley");

        block.text = "  Custom label  ".to_string();
        assert_eq!(block.display_text(), "Custom label");
    }

    #[test]
    fn test_compose_text_skips_blanks() {
        assert_eq!(compose_text("Choir", "", "Online", ""), "Choir · Online");
        assert_eq!(compose_text("", "", "", ""), "");
        assert_eq!(compose_text(" a ", "b", "", "c"), "a · b · c");
    }

    #[test]
    fn test_meta_line() {
        let mut block = sample_block();
        block.modality = "In person".to_string();
        block.note = "Bring sheet music".to_string();
        assert_eq!(block.meta_line(), "Riley · In person · Bring sheet music");
    }

    #[test]
    fn test_copied_to_clears_identity() {
        let mut block = sample_block();
        block.id = Some(BlockId::from("b-1"));

        let copy = block.copied_to(5, 720, 780);
        assert_eq!(copy.id, None);
        assert_eq!(copy.room_index, 5);
        assert_eq!(copy.start_min, 720);
        assert_eq!(copy.end_min, 780);
        assert_eq!(copy.group, block.group);
        assert_eq!(copy.instructor, block.instructor);
    }

    #[test]
    fn test_moved_to_keeps_identity() {
        let mut block = sample_block();
        block.id = Some(BlockId::from("b-1"));

        let moved = block.moved_to(4, 660, 720);
        assert_eq!(moved.id, Some(BlockId::from("b-1")));
        assert_eq!(moved.room_index, 4);
        assert_eq!(moved.duration_min(), 60);
    }

    #[test]
    fn test_duration() {
        assert_eq!(sample_block().duration_min(), 60);
    }

    #[test]
    fn test_sparse_wire_document_fills_defaults() {
        // Remote documents may omit any of the text fields
        let block: Block = serde_json::from_str(
            r#"{
                "id": "blk-000001",
                "day": "Monday",
                "room_index": 2,
                "start_min": 600,
                "end_min": 660
            }"#,
        )
        .unwrap();

        assert_eq!(block.id, Some(BlockId::from("blk-000001")));
        assert_eq!(block.day, Day::Monday);
        assert!(block.text.is_empty());
        assert!(block.group.is_empty());
        assert!(block.note.is_empty());
    }
}
