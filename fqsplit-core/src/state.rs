//! Splitter state machine

/// Phase of a splitting run.
///
/// `Reading → Aligning` on a non-empty read, `Aligning → Writing` once the
/// boundary is known, `Writing → SwitchingSink → Reading` when the output
/// changes, `Reading → Done` on an empty read. Any error ends in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SplitState {
    /// Waiting for the next chunk of input
    #[default]
    Reading,
    /// Locating the record boundary of the current chunk
    Aligning,
    /// Writing aligned bytes to the current output
    Writing,
    /// Moving on to the next output
    SwitchingSink,
    /// Input exhausted and every output closed
    Done,
    /// Aborted by an error
    Failed,
}

impl SplitState {
    /// Whether the run has ended, successfully or not
    pub fn is_terminal(&self) -> bool {
        matches!(self, SplitState::Done | SplitState::Failed)
    }
}
