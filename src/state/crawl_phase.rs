//! Phase definitions for a crawl run
//!
//! A run moves strictly forward: `Seeding → Draining → Done`. A run whose
//! start URL is rejected goes straight from `Seeding` to `Done`.

use std::fmt;

/// Represents the current phase of a crawl run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Start URL is being classified and the frontier seeded
    #[default]
    Seeding,

    /// Pins are being pulled from the frontier and processed
    Draining,

    /// No further fetches will happen
    Done,
}

impl CrawlPhase {
    /// Returns true if no further work will be done
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Checks whether moving from this phase to `next` is allowed
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Seeding, Self::Draining) | (Self::Seeding, Self::Done) | (Self::Draining, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seeding => "seeding",
            Self::Draining => "draining",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
