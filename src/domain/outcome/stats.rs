//! Outcome statistics over a user's live decisions.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::OutcomeResult;
use crate::domain::decision::EmotionalState;
use crate::domain::foundation::{CategoryId, DecisionId, Percentage};

/// Label used for decisions without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Decided multi-option decisions needed before position bias is reported.
pub const MIN_DECISIONS_FOR_POSITION_BIAS: u64 = 3;

/// Times a position must have been chosen to count as a bias.
pub const MIN_CHOSEN_FOR_POSITION_BIAS: u64 = 3;

/// Selection rate, in percent, a position needs to count as a bias.
pub const MIN_POSITION_BIAS_PERCENT: u64 = 30;

/// Check-ins an emotional state needs before it can be the best one.
pub const MIN_OUTCOMES_FOR_BEST_EMOTION: u64 = 2;

/// What the statistics need to know about one live decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeFacts {
    pub decision_id: DecisionId,
    pub category_id: Option<CategoryId>,
    pub category_name: Option<String>,
    pub emotional_state: Option<EmotionalState>,
    /// Result of the most recent check-in, if any.
    pub latest_result: Option<OutcomeResult>,
    pub option_count: u32,
    /// 1-based display position of the chosen option.
    pub chosen_position: Option<u32>,
}

/// Counts for one group of decisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub total: u64,
    pub with_outcomes: u64,
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
    /// Share of decisions with outcomes whose latest outcome was positive.
    pub positive_rate: Percentage,
}

impl Tally {
    fn add(&mut self, result: Option<OutcomeResult>) {
        self.total += 1;
        if let Some(result) = result {
            self.with_outcomes += 1;
            match result {
                OutcomeResult::Better => self.positive += 1,
                OutcomeResult::Worse => self.negative += 1,
                OutcomeResult::AsExpected => self.neutral += 1,
            }
        }
        self.positive_rate = Percentage::of(self.positive, self.with_outcomes);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category_id: Option<CategoryId>,
    pub name: String,
    #[serde(flatten)]
    pub tally: Tally,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionStats {
    pub emotional_state: EmotionalState,
    #[serde(flatten)]
    pub tally: Tally,
}

/// How often the option shown at one position ends up chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionBias {
    /// 1-based display position.
    pub position: u32,
    pub chosen: u64,
    /// Decisions that had an option at this position.
    pub total: u64,
    pub percentage: Percentage,
}

impl PositionBias {
    /// The position chosen most often relative to how often it was offered.
    ///
    /// Only decisions with a chosen option among two or more count. Returns
    /// `None` until enough such decisions exist or when no position clears
    /// both thresholds. Ties go to the earlier position.
    pub fn detect(facts: &[OutcomeFacts]) -> Option<Self> {
        let decided: Vec<(u32, u32)> = facts
            .iter()
            .filter(|f| f.option_count > 1)
            .filter_map(|f| f.chosen_position.map(|p| (p, f.option_count)))
            .collect();
        if (decided.len() as u64) < MIN_DECISIONS_FOR_POSITION_BIAS {
            return None;
        }

        let mut positions: BTreeMap<u32, (u64, u64)> = BTreeMap::new();
        for (chosen, option_count) in decided {
            for position in 1..=option_count {
                let (picked, offered) = positions.entry(position).or_default();
                *offered += 1;
                if position == chosen {
                    *picked += 1;
                }
            }
        }

        let mut best: Option<Self> = None;
        for (position, (chosen, total)) in positions {
            if chosen < MIN_CHOSEN_FOR_POSITION_BIAS
                || chosen * 100 < MIN_POSITION_BIAS_PERCENT * total
            {
                continue;
            }
            let beats = best
                .as_ref()
                .map_or(true, |b| chosen * b.total > b.chosen * total);
            if beats {
                best = Some(Self {
                    position,
                    chosen,
                    total,
                    percentage: Percentage::of(chosen, total),
                });
            }
        }
        best
    }
}

/// Aggregate outcome statistics for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionStats {
    #[serde(flatten)]
    pub overall: Tally,
    /// Largest groups first, then by name.
    pub by_category: Vec<CategoryStats>,
    /// Only decisions with a recorded emotional state; largest groups first.
    pub by_emotional_state: Vec<EmotionStats>,
    /// Emotional state with the highest positive rate among those with
    /// enough check-ins. The earlier entry of `by_emotional_state` wins ties.
    pub best_emotional_state: Option<EmotionStats>,
    pub position_bias: Option<PositionBias>,
}

impl DecisionStats {
    /// Classifies each decision by its latest outcome and tallies the groups.
    ///
    /// Callers pass live decisions only.
    pub fn compute(facts: &[OutcomeFacts]) -> Self {
        let mut overall = Tally::default();
        let mut categories: HashMap<Option<CategoryId>, CategoryStats> = HashMap::new();
        let mut emotions: HashMap<EmotionalState, Tally> = HashMap::new();

        for fact in facts {
            overall.add(fact.latest_result);

            categories
                .entry(fact.category_id)
                .or_insert_with(|| CategoryStats {
                    category_id: fact.category_id,
                    name: match (&fact.category_id, &fact.category_name) {
                        (Some(_), Some(name)) => name.clone(),
                        _ => UNCATEGORIZED.to_string(),
                    },
                    tally: Tally::default(),
                })
                .tally
                .add(fact.latest_result);

            if let Some(state) = fact.emotional_state {
                emotions.entry(state).or_default().add(fact.latest_result);
            }
        }

        let mut by_category: Vec<CategoryStats> = categories.into_values().collect();
        by_category.sort_by(|a, b| {
            b.tally
                .total
                .cmp(&a.tally.total)
                .then_with(|| a.name.cmp(&b.name))
        });

        let mut by_emotional_state: Vec<EmotionStats> = emotions
            .into_iter()
            .map(|(emotional_state, tally)| EmotionStats {
                emotional_state,
                tally,
            })
            .collect();
        by_emotional_state.sort_by(|a, b| {
            b.tally
                .total
                .cmp(&a.tally.total)
                .then_with(|| a.emotional_state.as_str().cmp(b.emotional_state.as_str()))
        });

        let best_emotional_state = best_emotion(&by_emotional_state);

        Self {
            overall,
            by_category,
            by_emotional_state,
            best_emotional_state,
            position_bias: PositionBias::detect(facts),
        }
    }
}

fn best_emotion(emotions: &[EmotionStats]) -> Option<EmotionStats> {
    let mut best: Option<&EmotionStats> = None;
    for candidate in emotions
        .iter()
        .filter(|e| e.tally.with_outcomes >= MIN_OUTCOMES_FOR_BEST_EMOTION)
    {
        let better = best.map_or(true, |b| {
            compare_positive_rate(&candidate.tally, &b.tally) == Ordering::Greater
        });
        if better {
            best = Some(candidate);
        }
    }
    best.cloned()
}

/// Compares exact positive rates without rounding.
fn compare_positive_rate(a: &Tally, b: &Tally) -> Ordering {
    (a.positive * b.with_outcomes).cmp(&(b.positive * a.with_outcomes))
}
