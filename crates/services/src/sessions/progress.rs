/// Lifecycle state of a quiz session, derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No questions loaded yet (or the last file had none).
    Empty,
    InProgress,
    /// Submitted; answers are frozen until the next load.
    Completed,
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionProgress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    pub is_first: bool,
    pub is_last: bool,
    pub status: SessionStatus,
}

impl SessionProgress {
    /// `position / total`, in `(0.0, 1.0]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.position as f64 / self.total as f64
    }
}
