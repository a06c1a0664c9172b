//! The Deskhand dispatch loop and session history export.

pub mod history;
pub mod loop_runner;

pub use history::HistoryWriter;
pub use loop_runner::AgentLoop;
