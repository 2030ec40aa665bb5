//! Sequencing of asynchronous "load persisted dates" results.
//!
//! Every month/year change mints a new [`LoadToken`]. A result may touch the
//! displayed grid only while its token is the most recently minted one;
//! anything older is dropped without mutating state. The in-flight fetch is
//! never aborted, it is simply invalidated.

use crate::domain::models::LoadToken;

#[derive(Debug, Clone, Default)]
pub struct ReconciliationGuard {
    generation: u64,
}

impl ReconciliationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a token, invalidating every token issued before it
    pub fn begin(&mut self) -> LoadToken {
        self.generation += 1;
        LoadToken(self.generation)
    }

    pub fn current(&self) -> Option<LoadToken> {
        (self.generation > 0).then_some(LoadToken(self.generation))
    }

    pub fn is_current(&self, token: LoadToken) -> bool {
        self.current() == Some(token)
    }
}
