pub mod chat;
pub mod crops;
pub mod detection;
pub mod fsm;

/// Outcome of handing input to an interaction point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    Ignored(IgnoreReason),
}

impl Submission {
    pub fn is_accepted(self) -> bool {
        matches!(self, Submission::Accepted)
    }
}

/// Why input was dropped. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyInput,
    NoImage,
    MissingSoilType,
    MissingField(&'static str),
    Busy,
    /// The flow was reset while the request was pending.
    Discarded,
}
