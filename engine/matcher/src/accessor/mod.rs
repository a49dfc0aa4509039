//! The accessor module contains the logic to read the target field of a rule line from an Entry.

use crate::config::EntryField;
use feedsift_common_api::Entry;

/// The value read from an Entry field.
#[derive(Debug, PartialEq)]
pub enum AccessorValue<'o> {
    Text(&'o str),
    List(&'o [String]),
}

/// Reads one of the textual fields of an Entry.
/// The date field is not covered here because it is matched by a date predicate, not by a regex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    Title,
    Url,
    CommentsUrl,
    Content,
    Author,
    Tags,
}

impl Accessor {
    /// Returns the Accessor for a field, or None if the field has no textual value.
    pub fn for_field(field: EntryField) -> Option<Accessor> {
        match field {
            EntryField::Title => Some(Accessor::Title),
            EntryField::Url => Some(Accessor::Url),
            EntryField::CommentsUrl => Some(Accessor::CommentsUrl),
            EntryField::Content => Some(Accessor::Content),
            EntryField::Author => Some(Accessor::Author),
            EntryField::Tag => Some(Accessor::Tags),
            EntryField::Date => None,
        }
    }

    pub fn get<'o>(&self, entry: &'o Entry) -> AccessorValue<'o> {
        match self {
            Accessor::Title => AccessorValue::Text(&entry.title),
            Accessor::Url => AccessorValue::Text(&entry.url),
            Accessor::CommentsUrl => AccessorValue::Text(&entry.comments_url),
            Accessor::Content => AccessorValue::Text(&entry.content),
            Accessor::Author => AccessorValue::Text(&entry.author),
            Accessor::Tags => AccessorValue::List(&entry.tags),
        }
    }
}
