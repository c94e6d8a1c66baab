//! Accelerator capability, resolved once at startup.

use std::sync::Arc;

use crate::calculator::Calculator;

/// Whether an accelerated calculator is loaded.
#[derive(Clone, Debug, Default)]
pub enum Accelerator {
    /// The accelerator is loaded and ready.
    Available(Arc<dyn Calculator>),
    /// No accelerator in this deployment.
    #[default]
    Unavailable,
}

impl Accelerator {
    /// Probe for an accelerator.
    ///
    /// Builds with the `gmp` feature carry a GMP-backed calculator; every other
    /// build, or `enabled == false`, reports [`Accelerator::Unavailable`].
    /// Absence is never an error.
    #[must_use]
    pub fn detect(enabled: bool) -> Self {
        if !enabled {
            tracing::info!("accelerator disabled by configuration");
            return Accelerator::Unavailable;
        }
        Self::probe()
    }

    #[cfg(feature = "gmp")]
    fn probe() -> Self {
        tracing::info!("accelerator available: GMP");
        Accelerator::Available(Arc::new(crate::calculator_gmp::GmpCalculator::new()))
    }

    #[cfg(not(feature = "gmp"))]
    fn probe() -> Self {
        tracing::info!("accelerator not compiled in; serving native implementation only");
        Accelerator::Unavailable
    }

    /// Whether an accelerated calculator is loaded.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Accelerator::Available(_))
    }

    /// The accelerated calculator, if loaded.
    #[must_use]
    pub fn calculator(&self) -> Option<&Arc<dyn Calculator>> {
        match self {
            Accelerator::Available(calc) => Some(calc),
            Accelerator::Unavailable => None,
        }
    }
}
