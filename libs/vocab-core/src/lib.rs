//! Core vocabulary trainer library.
//!
//! Provides:
//! - Pipe-delimited vocabulary parser and in-memory vocabulary store
//! - Interval ladder spaced repetition scheduler with write-through persistence
//! - Experience points and levels
//! - Caller-owned study session navigation

pub mod algorithm;
pub mod error;
pub mod experience;
pub mod parser;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod types;
pub mod vocabulary;

pub use algorithm::{IntervalLadder, LadderScheduler, SchedulingAlgorithm, SchedulingResult};
pub use error::{LadderError, Result, SchedulerError, StoreError};
pub use experience::{Experience, ExperienceRules};
pub use parser::parse;
pub use scheduler::Scheduler;
pub use session::StudySession;
pub use store::{JsonFileStore, MemoryStore, ReviewStore};
pub use types::{
    FailurePolicy, ParseMode, ProgressSnapshot, ProgressSummary, ReviewMap, ReviewState,
    VocabularyItem,
};
pub use vocabulary::{Vocabulary, VocabularyStats};
