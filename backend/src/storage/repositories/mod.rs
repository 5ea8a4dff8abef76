pub mod child_repository;
pub mod journal_repository;

pub use child_repository::ChildRepository;
pub use journal_repository::JournalRepository;
