// src/progress.rs
use std::fmt;

/// Pipeline stages of one episode, in the order they complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Metadata,
    Rounds,
    FinalRound,
    Identities,
    Assemble,
}

impl Stage {
    pub const ALL: [Stage; 5] =
        [Stage::Metadata, Stage::Rounds, Stage::FinalRound, Stage::Identities, Stage::Assemble];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Metadata => "metadata",
            Stage::Rounds => "rounds",
            Stage::FinalRound => "final round",
            Stage::Identities => "identities",
            Stage::Assemble => "assemble",
        })
    }
}

/// Lightweight progress reporting for a scrape.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of stages.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one stage completes, with the number of items it produced.
    fn stage_done(&mut self, _stage: Stage, _items: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
