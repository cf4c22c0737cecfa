//! Progress events emitted by the contact workflow.
//!
//! The library never renders progress itself. Front ends install a callback on a
//! [`ProgressReporter`] and translate the events into whatever display they use.

/// A single progress event.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// A named phase of the workflow begins.
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// A countable task begins; one `TaskIncrement` follows per finished step.
    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    /// Free-form status line.
    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional callback.
///
/// A reporter without a callback swallows every event, so library code can
/// report unconditionally.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Convenience for a [`Progress::Message`] event.
    pub fn message(&self, text: impl Into<String>) {
        self.report(Progress::Message(text.into()));
    }
}
