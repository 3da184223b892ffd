use crate::core::OutcomeFamily;
use crate::linalg::CanonicalCorrelation;
use crate::registry::{RegistryError, SplitRule};
use crate::split_statistics::{
    CcaSplitStatistic, ClassificationSplitStatistic, CompetingRiskSplitStatistic,
    LogRankSplitStatistic, RegressionSplitStatistic, SplitStatistic,
};
use log::info;
use std::fmt;
use std::sync::{Arc, OnceLock};
use strum::IntoEnumIterator;

/// Slots available to each outcome family.
pub const MAX_SLOTS: usize = 16;

type Slots = [Option<Arc<dyn SplitStatistic>>; MAX_SLOTS];

/// Fixed-capacity table from `(family, slot)` to a split statistic.
///
/// Filled while the table is owned mutably, then shared read-only.
pub struct SplitRuleRegistry {
    table: [Slots; OutcomeFamily::COUNT],
}

impl SplitRuleRegistry {
    pub fn new() -> Self {
        Self {
            table: std::array::from_fn(|_| std::array::from_fn(|_| None)),
        }
    }

    /// The statistics every fresh process starts with:
    ///
    /// | family         | slot | statistic               |
    /// |----------------|------|-------------------------|
    /// | classification | 1    | classification          |
    /// | regression     | 1    | regression              |
    /// | regression     | 2    | canonical-correlation   |
    /// | survival       | 1    | log-rank                |
    /// | competing-risk | 1    | competing-risk-log-rank |
    pub fn with_builtin_rules() -> Self {
        let mut registry = Self::new();
        let builtin: [(OutcomeFamily, usize, Arc<dyn SplitStatistic>); 5] = [
            (
                OutcomeFamily::Classification,
                1,
                Arc::new(ClassificationSplitStatistic::new()),
            ),
            (OutcomeFamily::Regression, 1, Arc::new(RegressionSplitStatistic::new())),
            (
                OutcomeFamily::Regression,
                2,
                Arc::new(CcaSplitStatistic::new(CanonicalCorrelation::default())),
            ),
            (OutcomeFamily::Survival, 1, Arc::new(LogRankSplitStatistic::new())),
            (
                OutcomeFamily::CompetingRisk,
                1,
                Arc::new(CompetingRiskSplitStatistic::new()),
            ),
        ];
        for (family, slot, statistic) in builtin {
            registry.table[family.index()][slot - 1] = Some(statistic);
        }
        info!("split rule registry built with {} builtin rules", registry.len());
        registry
    }

    /// Installs `statistic` in `(family, slot)`, handing back whatever was there.
    pub fn register(
        &mut self,
        family: OutcomeFamily,
        slot: usize,
        statistic: Arc<dyn SplitStatistic>,
    ) -> Result<Option<Arc<dyn SplitStatistic>>, RegistryError> {
        let rule = SplitRule::new(slot)?;
        let cell = &mut self.table[family.index()][rule.slot() - 1];
        match cell {
            Some(previous) => info!(
                "{family} slot {slot}: {} replaced by {}",
                previous.name(),
                statistic.name()
            ),
            None => info!("{family} slot {slot}: registered {}", statistic.name()),
        }
        Ok(cell.replace(statistic))
    }

    /// Empties `(family, slot)`.
    pub fn unregister(
        &mut self,
        family: OutcomeFamily,
        slot: usize,
    ) -> Result<Option<Arc<dyn SplitStatistic>>, RegistryError> {
        let rule = SplitRule::new(slot)?;
        Ok(self.table[family.index()][rule.slot() - 1].take())
    }

    pub fn get(&self, family: OutcomeFamily, slot: usize) -> Result<&dyn SplitStatistic, RegistryError> {
        let rule = SplitRule::new(slot)?;
        self.table[family.index()][rule.slot() - 1]
            .as_deref()
            .ok_or(RegistryError::Unregistered { family, slot })
    }

    /// Looks up a statistic by rule name (`custom`, `custom2`, ...).
    pub fn resolve(&self, family: OutcomeFamily, rule: &str) -> Result<&dyn SplitStatistic, RegistryError> {
        let rule: SplitRule = rule.parse()?;
        self.get(family, rule.slot())
    }

    /// Every filled slot, by family then slot.
    pub fn registered(&self) -> impl Iterator<Item = (OutcomeFamily, usize, &dyn SplitStatistic)> {
        OutcomeFamily::iter().flat_map(move |family| {
            self.table[family.index()]
                .iter()
                .enumerate()
                .filter_map(move |(i, cell)| cell.as_deref().map(|s| (family, i + 1, s)))
        })
    }

    pub fn len(&self) -> usize {
        self.table.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SplitRuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SplitRuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.registered()
                    .map(|(family, slot, statistic)| (family, slot, statistic.name())),
            )
            .finish()
    }
}

/// Process-wide table holding the builtin rules, built on first use.
pub fn global_registry() -> &'static SplitRuleRegistry {
    static REGISTRY: OnceLock<SplitRuleRegistry> = OnceLock::new();
    REGISTRY.get_or_init(SplitRuleRegistry::with_builtin_rules)
}
