use crate::{Error, Result};

/// Makes a fraction of a queue's allocations fail on purpose.
///
/// Each allocation step of an insertion (the string copy and the node slot)
/// fails with [`Error::AllocationFailure`] with probability `percent / 100`.
pub struct FaultInjector {
    percent: u8,
    rng: fastrand::Rng,
}

impl FaultInjector {
    pub fn new(percent: u8) -> Self {
        Self::with_rng(percent, fastrand::Rng::new())
    }

    /// Creates an injector whose failures are reproducible.
    pub fn with_seed(percent: u8, seed: u64) -> Self {
        Self::with_rng(percent, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(percent: u8, rng: fastrand::Rng) -> Self {
        assert!(percent <= 100, "failure rate must not exceed 100%");
        Self { percent, rng }
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    fn trip(&mut self, site: &'static str) -> bool {
        let hit = self.percent != 0 && self.rng.u8(..100) < self.percent;
        if hit {
            tracing::debug!("injected allocation failure, site={site}");
        }
        hit
    }
}

impl std::fmt::Debug for FaultInjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaultInjector")
            .field("percent", &self.percent)
            .finish_non_exhaustive()
    }
}

/// Copies `s` into freshly allocated storage.
pub(crate) fn copy_str(s: &str, faults: Option<&mut FaultInjector>) -> Result<String> {
    if faults.is_some_and(|f| f.trip("string")) {
        return Err(Error::AllocationFailure);
    }
    let mut value = String::new();
    value.try_reserve_exact(s.len()).map_err(|e| {
        tracing::debug!("failed to copy string, len={}: {e}", s.len());
        Error::AllocationFailure
    })?;
    value.push_str(s);
    Ok(value)
}

/// Checks whether a node slot may be taken.
pub(crate) fn claim_slot(faults: Option<&mut FaultInjector>) -> Result<()> {
    if faults.is_some_and(|f| f.trip("node")) {
        return Err(Error::AllocationFailure);
    }
    Ok(())
}
