/// Lifecycle of a single submission.
///
/// `Composing` is the idle state between submissions. `Compressing` is only
/// entered when an attachment is present. `Error` can follow `Compressing`,
/// `Dispatching` or `Streaming`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Composing,
    Compressing,
    Dispatching,
    Streaming,
    Finalized,
    Error,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        return *self == Phase::Finalized || *self == Phase::Error;
    }
}
