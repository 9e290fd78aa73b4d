//! Classification of a match by its starting match-odds prices.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::domain::{Odds, Side};

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, EnumIter, Serialize, Deserialize)]
pub enum PriceLabel {
    HomeStrongFav,
    HomeMediumFav,
    HomeSmallFav,
    SuperCompetitive,
    AwayStrongFav,
    AwayMediumFav,
    AwaySmallFav,
    Others,
}
impl PriceLabel {
    /// Home-price bands are checked first; a home price of 3 or more falls through to the
    /// competitive and away-favourite bands.
    pub fn of(odds: Option<&Odds>) -> PriceLabel {
        let Some(odds) = odds else {
            return PriceLabel::Others;
        };
        let (home, away) = (odds.home, odds.away);
        if !home.is_finite() || !away.is_finite() {
            PriceLabel::Others
        } else if home < 1.5 {
            PriceLabel::HomeStrongFav
        } else if home < 2.0 {
            PriceLabel::HomeMediumFav
        } else if home < 3.0 {
            PriceLabel::HomeSmallFav
        } else if home <= 3.0 && away <= 3.0 {
            PriceLabel::SuperCompetitive
        } else if away < 1.5 {
            PriceLabel::AwayStrongFav
        } else if away < 2.0 {
            PriceLabel::AwayMediumFav
        } else if away < 3.0 {
            PriceLabel::AwaySmallFav
        } else {
            PriceLabel::Others
        }
    }

    /// The side whose goals count as "scored" in a label's time-frame distribution; `None` means
    /// both sides' goals count in both series.
    pub fn perspective(&self) -> Option<Side> {
        match self {
            PriceLabel::HomeStrongFav
            | PriceLabel::HomeMediumFav
            | PriceLabel::HomeSmallFav
            | PriceLabel::SuperCompetitive => Some(Side::Home),
            PriceLabel::AwayStrongFav | PriceLabel::AwayMediumFav | PriceLabel::AwaySmallFav => {
                Some(Side::Away)
            }
            PriceLabel::Others => None,
        }
    }
}

impl Display for PriceLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            PriceLabel::HomeStrongFav => "H_StrongFav <1.5",
            PriceLabel::HomeMediumFav => "H_MediumFav 1.5-2",
            PriceLabel::HomeSmallFav => "H_SmallFav 2-3",
            PriceLabel::SuperCompetitive => "SuperCompetitive H-A<3",
            PriceLabel::AwayStrongFav => "A_StrongFav <1.5",
            PriceLabel::AwayMediumFav => "A_MediumFav 1.5-2",
            PriceLabel::AwaySmallFav => "A_SmallFav 2-3",
            PriceLabel::Others => "Others",
        };
        write!(f, "{str}")
    }
}
