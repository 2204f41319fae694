//! Vote entity - a judge's score sheet for one team

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Lowest and highest allowed score for each criterion
pub const MIN_SCORE: i16 = 1;
pub const MAX_SCORE: i16 = 10;

/// The four judged criteria, each 1..=10
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteScores {
    pub innovation: i16,
    pub implementation: i16,
    pub design: i16,
    pub presentation: i16,
}

impl VoteScores {
    pub fn new(
        innovation: i16,
        implementation: i16,
        design: i16,
        presentation: i16,
    ) -> Result<Self, DomainError> {
        for (criterion, score) in [
            ("innovation", innovation),
            ("implementation", implementation),
            ("design", design),
            ("presentation", presentation),
        ] {
            if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
                return Err(DomainError::InvalidScore {
                    criterion,
                    value: score,
                });
            }
        }
        Ok(Self {
            innovation,
            implementation,
            design,
            presentation,
        })
    }

    /// Weighted total on a 10..=100 scale.
    ///
    /// Innovation and implementation weigh 30% each, design and presentation 20% each.
    pub fn total(&self) -> f64 {
        (f64::from(self.innovation) * 0.3
            + f64::from(self.implementation) * 0.3
            + f64::from(self.design) * 0.2
            + f64::from(self.presentation) * 0.2)
            * 10.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vote {
    pub id: Snowflake,
    pub judge_id: Snowflake,
    pub team_id: Snowflake,
    pub scores: VoteScores,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(
        id: Snowflake,
        judge_id: Snowflake,
        team_id: Snowflake,
        scores: VoteScores,
        comments: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            judge_id,
            team_id,
            scores,
            comments,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn total_score(&self) -> f64 {
        self.scores.total()
    }
}
