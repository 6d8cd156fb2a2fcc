//! Stage 3 (§4.5): NaN/Inf sanity over the raw market fields. Any one
//! non-finite value hard-gates the bar — this check runs regardless of
//! what staleness or cross-validation concluded.

/// True if any of the glitch-sanity fields is NaN or infinite.
pub fn any_glitch(fields: &[f64]) -> bool {
    fields.iter().any(|f| !f.is_finite())
}
