use std::fmt;

use clap::ValueEnum;

use crate::event::{ActionEvent, SettlementEvent};

/// Turns the settlement that concluded an action's round into a number.
pub trait MetricStrategy: Send + Sync {
    fn extract(&self, action: &ActionEvent, settlement: &SettlementEvent) -> Option<f64>;

    /// Column title used by reports.
    fn label(&self) -> &'static str;
}

/// Hand strength of the acting player, only when they won the round.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankMetric;

impl MetricStrategy for RankMetric {
    fn extract(&self, action: &ActionEvent, settlement: &SettlementEvent) -> Option<f64> {
        settlement.find_winner(&action.player).map(|hand| hand.rank)
    }

    fn label(&self) -> &'static str {
        "AverageRank"
    }
}

/// Net chip change between the action and the end of its round.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultMetric;

impl MetricStrategy for ResultMetric {
    fn extract(&self, action: &ActionEvent, settlement: &SettlementEvent) -> Option<f64> {
        settlement
            .find_player(&action.player)
            .map(|final_state| final_state.chips as f64 - action.chips as f64)
    }

    fn label(&self) -> &'static str {
        "AverageResult"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MetricKind {
    #[default]
    Rank,
    Result,
}

impl MetricKind {
    pub fn strategy(self) -> &'static dyn MetricStrategy {
        match self {
            MetricKind::Rank => &RankMetric,
            MetricKind::Result => &ResultMetric,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Rank => "rank",
            MetricKind::Result => "result",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
