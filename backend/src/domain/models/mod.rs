pub mod child;
pub mod journal_entry;

pub use child::{Child, ChildChanges, Gender, NewChild};
pub use journal_entry::{Escort, JournalEntry, JournalEntryChanges, JournalEntryFields};
