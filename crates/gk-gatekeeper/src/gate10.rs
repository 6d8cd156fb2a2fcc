//! GATE 10 — Correlation / Exposure (§4.17). Portfolio-level,
//! size-invariant checks against existing open positions.

use gk_config::Gate10Config;
use gk_domain::{MarketState, PortfolioState, Position};

use crate::gate9::Gate09Result;

/// Candidate trade's asset/sector tags and projected R-risk, needed
/// alongside the portfolio to evaluate exposure limits (§4.17).
#[derive(Clone, Debug, PartialEq)]
pub struct Gate10Input {
    pub symbol: String,
    pub direction_sign: f64,
    pub asset_tag: String,
    pub sector_tag: String,
    pub candidate_exposure_r: f64,
}

/// Result of GATE 10 (§4.17).
#[derive(Clone, Debug)]
pub struct Gate10Result {
    pub entry_allowed: bool,
    pub block_reason: String,
    pub gate09: Gate09Result,
    pub max_abs_correlation: f64,
    pub correlation_mult: f64,
    pub total_exposure_r_after: f64,
    pub asset_exposure_r_after: f64,
    pub sector_exposure_r_after: f64,
    pub details: String,
}

fn position_direction_sign(position: &Position) -> f64 {
    match position.direction {
        gk_domain::Direction::Long => 1.0,
        gk_domain::Direction::Short => -1.0,
    }
}

/// Evaluate GATE 10 (§4.17).
pub fn evaluate(
    cfg: &Gate10Config,
    gate09: Gate09Result,
    portfolio: &PortfolioState,
    market: &MarketState,
    input: Gate10Input,
) -> Gate10Result {
    if !gate09.entry_allowed {
        let block_reason = format!("gate09_blocked:{}", gate09.block_reason);
        let details = format!("GATE 9 blocked: {}", gate09.block_reason);
        return Gate10Result {
            entry_allowed: false,
            block_reason,
            max_abs_correlation: 0.0,
            correlation_mult: 1.0,
            total_exposure_r_after: portfolio.total_exposure_r(),
            asset_exposure_r_after: 0.0,
            sector_exposure_r_after: 0.0,
            details,
            gate09,
        };
    }

    let mut max_abs_correlation: f64 = 0.0;
    for position in &portfolio.positions {
        let rho = market.correlation_with(&position.symbol);
        let same_direction = position_direction_sign(position) == input.direction_sign;
        if same_direction && rho.abs() > max_abs_correlation {
            max_abs_correlation = rho.abs();
        }
        if same_direction && rho.abs() >= cfg.corr_hard_max {
            return Gate10Result {
                entry_allowed: false,
                block_reason: "correlation_conflict".to_string(),
                details: format!(
                    "|correlation| to {}={:.3} >= corr_hard_max={:.3} (same direction)",
                    position.symbol,
                    rho.abs(),
                    cfg.corr_hard_max
                ),
                max_abs_correlation,
                correlation_mult: 0.0,
                total_exposure_r_after: portfolio.total_exposure_r(),
                asset_exposure_r_after: 0.0,
                sector_exposure_r_after: 0.0,
                gate09,
            };
        }
    }

    let correlation_mult = if max_abs_correlation <= cfg.corr_soft_max {
        1.0
    } else if max_abs_correlation >= cfg.corr_hard_max {
        0.0
    } else {
        (cfg.corr_hard_max - max_abs_correlation) / (cfg.corr_hard_max - cfg.corr_soft_max)
    };

    let total_exposure_r_before = portfolio.total_exposure_r();
    let asset_exposure_r_before = portfolio.exposure_r_where(|p| p.asset_tag == input.asset_tag);
    let sector_exposure_r_before = portfolio.exposure_r_where(|p| p.sector_tag == input.sector_tag);

    let total_exposure_r_after = total_exposure_r_before + input.candidate_exposure_r;
    let asset_exposure_r_after = asset_exposure_r_before + input.candidate_exposure_r;
    let sector_exposure_r_after = sector_exposure_r_before + input.candidate_exposure_r;

    if asset_exposure_r_after > cfg.max_exposure_asset_r {
        return Gate10Result {
            entry_allowed: false,
            block_reason: "exposure_exceeded".to_string(),
            details: format!(
                "asset_exposure_R_after={asset_exposure_r_after:.3} > max_exposure_asset_R={:.3}",
                cfg.max_exposure_asset_r
            ),
            max_abs_correlation,
            correlation_mult,
            total_exposure_r_after,
            asset_exposure_r_after,
            sector_exposure_r_after,
            gate09,
        };
    }
    if sector_exposure_r_after > cfg.max_exposure_sector_r {
        return Gate10Result {
            entry_allowed: false,
            block_reason: "exposure_exceeded".to_string(),
            details: format!(
                "sector_exposure_R_after={sector_exposure_r_after:.3} > max_exposure_sector_R={:.3}",
                cfg.max_exposure_sector_r
            ),
            max_abs_correlation,
            correlation_mult,
            total_exposure_r_after,
            asset_exposure_r_after,
            sector_exposure_r_after,
            gate09,
        };
    }
    if total_exposure_r_after > cfg.max_exposure_total_r {
        return Gate10Result {
            entry_allowed: false,
            block_reason: "exposure_exceeded".to_string(),
            details: format!(
                "total_exposure_R_after={total_exposure_r_after:.3} > max_exposure_total_R={:.3}",
                cfg.max_exposure_total_r
            ),
            max_abs_correlation,
            correlation_mult,
            total_exposure_r_after,
            asset_exposure_r_after,
            sector_exposure_r_after,
            gate09,
        };
    }

    let position_count_after = portfolio.open_position_count() as u32 + 1;
    if position_count_after > cfg.max_positions {
        return Gate10Result {
            entry_allowed: false,
            block_reason: "exposure_exceeded".to_string(),
            details: format!("open_position_count+1={position_count_after} > max_positions={}", cfg.max_positions),
            max_abs_correlation,
            correlation_mult,
            total_exposure_r_after,
            asset_exposure_r_after,
            sector_exposure_r_after,
            gate09,
        };
    }

    if total_exposure_r_after > 0.0 && asset_exposure_r_after > cfg.max_concentration_r_frac * total_exposure_r_after {
        return Gate10Result {
            entry_allowed: false,
            block_reason: "exposure_exceeded".to_string(),
            details: format!(
                "asset concentration {:.3} > max_concentration_R_frac={:.3} of total_exposure_R={total_exposure_r_after:.3}",
                asset_exposure_r_after / total_exposure_r_after,
                cfg.max_concentration_r_frac
            ),
            max_abs_correlation,
            correlation_mult,
            total_exposure_r_after,
            asset_exposure_r_after,
            sector_exposure_r_after,
            gate09,
        };
    }

    Gate10Result {
        entry_allowed: true,
        block_reason: String::new(),
        details: format!(
            "PASS: max_abs_correlation={max_abs_correlation:.3}, total_exposure_R_after={total_exposure_r_after:.3}"
        ),
        max_abs_correlation,
        correlation_mult,
        total_exposure_r_after,
        asset_exposure_r_after,
        sector_exposure_r_after,
        gate09,
    }
}
