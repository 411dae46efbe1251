pub mod progress;
pub mod settings;
pub mod study;
pub mod vocabulary;
