//! Stage 1 (§4.5): per-source staleness scoring. `fresh` within `soft_sec`,
//! linear decay to `0.0` by `hard_sec`, and — for critical sources only —
//! a hard-gate once `age_sec > hard_sec`.

use gk_config::StalenessBounds;

use crate::types::SourceScore;

/// Score a source whose timestamp is always present (the four critical
/// sources: price, liquidity, orderbook, volatility).
pub fn score_critical(now_ts_ms: i64, source_ts_ms: i64, bounds: StalenessBounds) -> SourceScore {
    let age_sec = (now_ts_ms - source_ts_ms).max(0) as f64 / 1000.0;
    score_from_age(age_sec, bounds)
}

/// Score a source whose timestamp may be absent (non-critical sources).
/// Absence is treated as maximally stale, but never hard-gates — only
/// critical-source staleness hard-gates (§4.5 stage 1).
pub fn score_optional(now_ts_ms: i64, source_ts_ms: Option<i64>, bounds: StalenessBounds) -> SourceScore {
    match source_ts_ms {
        None => SourceScore::absent(),
        Some(ts) => {
            let age_sec = (now_ts_ms - ts).max(0) as f64 / 1000.0;
            score_from_age(age_sec, bounds)
        }
    }
}

fn score_from_age(age_sec: f64, bounds: StalenessBounds) -> SourceScore {
    if age_sec <= bounds.soft_sec {
        return SourceScore {
            age_sec,
            score: 1.0,
            is_hard_stale: false,
        };
    }
    if age_sec <= bounds.hard_sec {
        let span = (bounds.hard_sec - bounds.soft_sec).max(f64::EPSILON);
        let score = ((bounds.hard_sec - age_sec) / span).clamp(0.0, 1.0);
        return SourceScore {
            age_sec,
            score,
            is_hard_stale: false,
        };
    }
    SourceScore {
        age_sec,
        score: 0.0,
        is_hard_stale: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> StalenessBounds {
        StalenessBounds {
            soft_sec: 5.0,
            hard_sec: 30.0,
        }
    }

    #[test]
    fn fresh_within_soft_scores_one() {
        let s = score_critical(10_000, 9_000, bounds());
        assert_eq!(s.score, 1.0);
        assert!(!s.is_hard_stale);
    }

    #[test]
    fn degraded_between_soft_and_hard_decays_linearly() {
        let s = score_critical(30_000, 0, bounds());
        assert!((s.age_sec - 30.0).abs() < 1e-9);
        assert!((s.score - 0.0).abs() < 1e-9);

        let s_mid = score_critical(17_500, 0, bounds());
        assert!((s_mid.age_sec - 17.5).abs() < 1e-9);
        assert!(s_mid.score > 0.0 && s_mid.score < 1.0);
    }

    #[test]
    fn beyond_hard_is_hard_stale_and_zero_score() {
        let s = score_critical(40_000, 0, bounds());
        assert_eq!(s.score, 0.0);
        assert!(s.is_hard_stale);
    }

    #[test]
    fn absent_optional_source_is_treated_as_hard_stale() {
        let s = score_optional(10_000, None, bounds());
        assert_eq!(s.score, 0.0);
        assert!(s.is_hard_stale);
        assert!(s.age_sec.is_infinite());
    }

    #[test]
    fn present_optional_source_scores_normally() {
        let s = score_optional(10_000, Some(9_500), bounds());
        assert_eq!(s.score, 1.0);
    }
}
