use serde::{Deserialize, Serialize};

/// Trade direction, shared across `Position` and `Signal`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Long,
    Short,
}

/// An open position in the portfolio (§3 Position).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub sl_price: f64,
    pub tp_price: f64,
    pub quantity: f64,
    pub open_ts_ms: i64,
    /// Committed risk on this position, in R-units. Always `>= 0`.
    pub exposure_r: f64,
    pub asset_tag: String,
    pub sector_tag: String,
}

/// Reasons `Position::validate` can reject a position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PositionError {
    /// LONG requires `sl < entry < tp`; SHORT requires `tp < entry < sl`.
    LevelOrdering,
    /// `exposure_r` is negative.
    NegativeExposure,
}

impl std::fmt::Display for PositionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionError::LevelOrdering => {
                write!(f, "position_invariant: SL/entry/TP ordering violated for direction")
            }
            PositionError::NegativeExposure => {
                write!(f, "position_invariant: exposure_r must be >= 0")
            }
        }
    }
}

impl std::error::Error for PositionError {}

impl Position {
    /// Check the §3 Position invariants: direction-consistent level
    /// ordering, and non-negative exposure.
    pub fn validate(&self) -> Result<(), PositionError> {
        let ordering_ok = match self.direction {
            Direction::Long => self.sl_price < self.entry_price && self.entry_price < self.tp_price,
            Direction::Short => self.tp_price < self.entry_price && self.entry_price < self.sl_price,
        };
        if !ordering_ok {
            return Err(PositionError::LevelOrdering);
        }
        if self.exposure_r < 0.0 {
            return Err(PositionError::NegativeExposure);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_position() -> Position {
        Position {
            symbol: "BTC-USD".into(),
            direction: Direction::Long,
            entry_price: 100.0,
            sl_price: 99.0,
            tp_price: 102.0,
            quantity: 1.0,
            open_ts_ms: 1_000,
            exposure_r: 1.0,
            asset_tag: "crypto".into(),
            sector_tag: "majors".into(),
        }
    }

    #[test]
    fn valid_long_passes() {
        assert!(long_position().validate().is_ok());
    }

    #[test]
    fn long_with_inverted_levels_is_rejected() {
        let mut p = long_position();
        p.sl_price = 103.0;
        assert_eq!(p.validate(), Err(PositionError::LevelOrdering));
    }

    #[test]
    fn valid_short_passes() {
        let p = Position {
            direction: Direction::Short,
            entry_price: 100.0,
            sl_price: 101.0,
            tp_price: 98.0,
            ..long_position()
        };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn short_with_inverted_levels_is_rejected() {
        let p = Position {
            direction: Direction::Short,
            entry_price: 100.0,
            sl_price: 99.0,
            tp_price: 102.0,
            ..long_position()
        };
        assert_eq!(p.validate(), Err(PositionError::LevelOrdering));
    }

    #[test]
    fn negative_exposure_is_rejected() {
        let mut p = long_position();
        p.exposure_r = -0.1;
        assert_eq!(p.validate(), Err(PositionError::NegativeExposure));
    }
}
