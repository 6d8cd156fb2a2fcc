use serde::{Deserialize, Serialize};

/// Output of the external MLE predictor for a single signal (§3 MLEOutput,
/// §6 `MLE.predict`). The predictor itself is out of scope; this is just
/// the contract Gate 6 consumes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MLEOutput {
    pub p_success: f64,
    pub mu_success_r: f64,
    pub mu_fail_r: f64,
    pub confidence: f64,
    pub expected_cost_bps_post: f64,
}

/// Reasons `MLEOutput::validate` can reject an output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MLEOutputError {
    /// `p_success` or `confidence` is outside `[0, 1]`.
    ProbabilityOutOfRange,
    /// `mu_success_r` or `mu_fail_r` is negative.
    NegativeMagnitude,
}

impl std::fmt::Display for MLEOutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MLEOutputError::ProbabilityOutOfRange => {
                write!(f, "mle_output_invariant: p_success and confidence must be in [0, 1]")
            }
            MLEOutputError::NegativeMagnitude => {
                write!(f, "mle_output_invariant: mu_success_r and mu_fail_r must be >= 0")
            }
        }
    }
}

impl std::error::Error for MLEOutputError {}

impl MLEOutput {
    pub fn validate(&self) -> Result<(), MLEOutputError> {
        let in_unit = |x: f64| (0.0..=1.0).contains(&x);
        if !in_unit(self.p_success) || !in_unit(self.confidence) {
            return Err(MLEOutputError::ProbabilityOutOfRange);
        }
        if self.mu_success_r < 0.0 || self.mu_fail_r < 0.0 {
            return Err(MLEOutputError::NegativeMagnitude);
        }
        Ok(())
    }
}
