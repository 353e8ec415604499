use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Done,
    Skipped,
    /// Completed, but something needs the operator's attention.
    Warning,
    Failed,
}

impl Status {
    fn label(self) -> &'static str {
        match self {
            Status::Done => "ok",
            Status::Skipped => "skip",
            Status::Warning => "warn",
            Status::Failed => "FAIL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    /// File name or line the outcome is about.
    pub item: String,
    pub status: Status,
    pub message: String,
}

/// Ordered per-item outcomes of one workflow run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: impl Into<String>, status: Status, message: impl Into<String>) {
        self.outcomes.push(ItemOutcome {
            item: item.into(),
            status,
            message: message.into(),
        });
    }

    pub fn done(&mut self, item: impl Into<String>, message: impl Into<String>) {
        self.push(item, Status::Done, message);
    }

    pub fn skipped(&mut self, item: impl Into<String>, message: impl Into<String>) {
        self.push(item, Status::Skipped, message);
    }

    pub fn warning(&mut self, item: impl Into<String>, message: impl Into<String>) {
        self.push(item, Status::Warning, message);
    }

    pub fn failed(&mut self, item: impl Into<String>, message: impl Into<String>) {
        self.push(item, Status::Failed, message);
    }

    pub fn count(&self, status: Status) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    pub fn has_failures(&self) -> bool {
        self.count(Status::Failed) > 0
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for o in &self.outcomes {
            if o.message.is_empty() {
                writeln!(f, "[{:>4}] {}", o.status.label(), o.item)?;
            } else {
                writeln!(f, "[{:>4}] {}: {}", o.status.label(), o.item, o.message)?;
            }
        }
        write!(
            f,
            "{} done, {} skipped, {} warning(s), {} failed",
            self.count(Status::Done),
            self.count(Status::Skipped),
            self.count(Status::Warning),
            self.count(Status::Failed)
        )
    }
}
