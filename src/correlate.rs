use clap::ValueEnum;

use crate::aggregate::{BucketKey, Contribution};
use crate::event::{ActionEvent, SettlementEvent};
use crate::metric::MetricStrategy;
use crate::store::EventStore;

/// Which later settlement concludes an action's round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MatchPolicy {
    /// First same-seating settlement that still lists the acting player.
    /// Same-seating settlements without the player are skipped.
    #[default]
    PlayerPresent,
    /// First same-seating settlement; if the player is missing from it the
    /// action has no outcome.
    FirstSeating,
}

pub struct Correlator<'a> {
    store: &'a EventStore,
    strategy: &'a dyn MetricStrategy,
    policy: MatchPolicy,
}

impl<'a> Correlator<'a> {
    pub fn new(store: &'a EventStore, strategy: &'a dyn MetricStrategy) -> Correlator<'a> {
        Correlator {
            store,
            strategy,
            policy: MatchPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MatchPolicy) -> Correlator<'a> {
        self.policy = policy;
        self
    }

    pub fn find_settlement(&self, action: &ActionEvent) -> Option<&'a SettlementEvent> {
        let mut candidates = self
            .store
            .settlements_after(action.time)
            .filter(|s| s.table.same_seating(&action.table));

        match self.policy {
            MatchPolicy::PlayerPresent => {
                candidates.find(|s| s.find_player(&action.player).is_some())
            }
            MatchPolicy::FirstSeating => candidates
                .next()
                .filter(|s| s.find_player(&action.player).is_some()),
        }
    }

    /// `None` when no settlement concludes the action, or the metric is
    /// undefined for it (e.g. rank of a losing player).
    pub fn find_outcome(&self, action: &ActionEvent) -> Option<f64> {
        let settlement = self.find_settlement(action)?;
        self.strategy.extract(action, settlement)
    }

    pub fn contributions(&self) -> Vec<Contribution> {
        self.store
            .actions_in_time_order()
            .filter_map(|action| {
                self.find_outcome(action).map(|metric| Contribution {
                    time: action.time,
                    key: BucketKey::for_action(action),
                    metric,
                })
            })
            .collect()
    }
}
