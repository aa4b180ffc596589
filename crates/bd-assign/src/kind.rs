//! `PolicyKind` — a plain-data selector for the built-in strategies, suited
//! to scenario files and command lines.

use std::fmt;
use std::str::FromStr;

use crate::{
    AssignError, BackToFront, FrontToBack, OutsideIn, RandomOrder, SeatAssignment, SeatAssignmentExt,
    SegmentedRandom, SteffenPerfect,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PolicyKind {
    BackToFront,
    FrontToBack,
    Random,
    SegmentedRandom { segments: u32 },
    OutsideIn,
    SteffenPerfect,
}

impl PolicyKind {
    /// Every built-in strategy, segmented random with three blocks.
    pub const ALL: [PolicyKind; 6] = [
        PolicyKind::BackToFront,
        PolicyKind::FrontToBack,
        PolicyKind::Random,
        PolicyKind::SegmentedRandom { segments: 3 },
        PolicyKind::OutsideIn,
        PolicyKind::SteffenPerfect,
    ];

    /// Instantiate the strategy, wrapped in [`crate::Conformance`] when
    /// `conformance` is below 100 %.
    pub fn build(self, conformance: f64) -> Result<Box<dyn SeatAssignment>, AssignError> {
        let policy: Box<dyn SeatAssignment> = match self {
            PolicyKind::BackToFront => Box::new(BackToFront),
            PolicyKind::FrontToBack => Box::new(FrontToBack),
            PolicyKind::Random => Box::new(RandomOrder),
            PolicyKind::SegmentedRandom { segments } => Box::new(SegmentedRandom { segments }),
            PolicyKind::OutsideIn => Box::new(OutsideIn),
            PolicyKind::SteffenPerfect => Box::new(SteffenPerfect),
        };
        if conformance >= 100.0 {
            return Ok(policy);
        }
        Ok(Box::new(policy.with_conformance(conformance)?))
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::BackToFront => f.write_str("back_to_front"),
            PolicyKind::FrontToBack => f.write_str("front_to_back"),
            PolicyKind::Random => f.write_str("random"),
            PolicyKind::SegmentedRandom { segments } => write!(f, "segmented_random_{segments}"),
            PolicyKind::OutsideIn => f.write_str("outside_in"),
            PolicyKind::SteffenPerfect => f.write_str("steffen_perfect"),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = AssignError;

    /// Accepts the `Display` names; `segmented_random` alone means three
    /// segments.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "back_to_front" => PolicyKind::BackToFront,
            "front_to_back" => PolicyKind::FrontToBack,
            "random" => PolicyKind::Random,
            "segmented_random" => PolicyKind::SegmentedRandom { segments: 3 },
            "outside_in" => PolicyKind::OutsideIn,
            "steffen_perfect" => PolicyKind::SteffenPerfect,
            other => match other.strip_prefix("segmented_random_").map(str::parse::<u32>) {
                Some(Ok(segments)) => PolicyKind::SegmentedRandom { segments },
                _ => return Err(AssignError::Config(format!("unknown policy '{other}'"))),
            },
        };
        Ok(kind)
    }
}
