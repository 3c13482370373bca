use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Analyzing,
    Success,
    Error,
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AnalysisStatus::Idle => "idle",
            AnalysisStatus::Analyzing => "analyzing",
            AnalysisStatus::Success => "success",
            AnalysisStatus::Error => "error",
        };
        f.write_str(label)
    }
}

/// Current status plus the payload that belongs to it. `result` is only
/// set in `Success`, `error` only in `Error`.
#[derive(Debug, Default)]
pub struct AnalysisState {
    status: AnalysisStatus,
    result: Option<String>,
    error: Option<String>,
}

impl AnalysisState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.status == AnalysisStatus::Analyzing
    }

    /// Enters `Analyzing` when there is something to analyze and no request
    /// is in flight. Returns whether the transition happened.
    pub fn begin(&mut self, pending_images: usize) -> bool {
        if pending_images == 0 || self.is_busy() {
            return false;
        }
        self.transition(AnalysisStatus::Analyzing);
        self.result = None;
        self.error = None;
        true
    }

    pub fn succeed(&mut self, text: String) -> bool {
        if !self.is_busy() {
            tracing::warn!(status = %self.status, "analysis result arrived outside of a request");
            return false;
        }
        self.transition(AnalysisStatus::Success);
        self.result = Some(text);
        self.error = None;
        true
    }

    pub fn fail(&mut self, message: String) -> bool {
        if !self.is_busy() {
            tracing::warn!(status = %self.status, "analysis failure arrived outside of a request");
            return false;
        }
        self.transition(AnalysisStatus::Error);
        self.result = None;
        self.error = Some(message);
        true
    }

    /// New uploads invalidate a finished analysis. In-flight requests are
    /// left alone.
    pub fn images_added(&mut self) {
        if self.is_busy() {
            return;
        }
        self.reset_to_idle();
    }

    /// Clear-all. Refused while a request is in flight.
    pub fn reset(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.reset_to_idle();
        true
    }

    fn reset_to_idle(&mut self) {
        self.transition(AnalysisStatus::Idle);
        self.result = None;
        self.error = None;
    }

    fn transition(&mut self, next: AnalysisStatus) {
        if self.status != next {
            tracing::debug!(from = %self.status, to = %next, "analysis status changed");
        }
        self.status = next;
    }
}
