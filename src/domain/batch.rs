use std::fmt;

/// Where a batch is in its lifecycle. Only used for logging, the crawler
/// moves through the states in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Authenticating,
    AuthFailed,
    Fetching,
    Extracting,
    Recording,
    Closing,
    Done,
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatchState::Idle => "idle",
            BatchState::Authenticating => "authenticating",
            BatchState::AuthFailed => "auth-failed",
            BatchState::Fetching => "fetching",
            BatchState::Extracting => "extracting",
            BatchState::Recording => "recording",
            BatchState::Closing => "closing",
            BatchState::Done => "done",
        };
        f.write_str(name)
    }
}
