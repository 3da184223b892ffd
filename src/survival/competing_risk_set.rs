use crate::buffers::CountMatrix;
use crate::core::SurvivalView;
use crate::split_statistics::SplitStatisticError;
use crate::survival::risk_set::RiskSet;

/// [`RiskSet`] extended with event counts broken down by event type, and the
/// inclusive at-risk counts of the competing-risk log-rank test.
///
/// Event type `j` (1-based code) is stored in row `j - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetingRiskSet {
    risk_set: RiskSet,
    parent_event: CountMatrix,
    left_event: CountMatrix,
    parent_inclusive_at_risk: CountMatrix,
    left_inclusive_at_risk: CountMatrix,
}

impl CompetingRiskSet {
    pub fn tally(
        view: &SurvivalView<'_>,
        event_type_size: usize,
    ) -> Result<Self, SplitStatisticError> {
        if let Some(&code) = view
            .event
            .iter()
            .find(|&&code| code as usize > event_type_size)
        {
            return Err(SplitStatisticError::EventTypeOutOfRange {
                code,
                event_type_size,
            });
        }

        let buckets = view.event_times.len();
        let mut parent_event = CountMatrix::zeroed(event_type_size, buckets);
        let mut left_event = CountMatrix::zeroed(event_type_size, buckets);
        let risk_set = RiskSet::tally_observing(view, |i, k| {
            let row = view.event[i] as usize - 1;
            parent_event.increment(row, k);
            if view.membership[i].is_left() {
                left_event.increment(row, k);
            }
        });

        let parent_inclusive_at_risk =
            inclusive_at_risk(risk_set.parent_at_risk().as_slice(), &parent_event);
        let left_inclusive_at_risk =
            inclusive_at_risk(risk_set.left_at_risk().as_slice(), &left_event);

        Ok(Self {
            risk_set,
            parent_event,
            left_event,
            parent_inclusive_at_risk,
            left_inclusive_at_risk,
        })
    }

    pub fn risk_set(&self) -> &RiskSet {
        &self.risk_set
    }

    pub fn event_type_size(&self) -> usize {
        self.parent_event.dim().0
    }

    pub fn parent_event(&self) -> &CountMatrix {
        &self.parent_event
    }

    pub fn left_event(&self) -> &CountMatrix {
        &self.left_event
    }

    pub fn parent_inclusive_at_risk(&self) -> &CountMatrix {
        &self.parent_inclusive_at_risk
    }

    pub fn left_inclusive_at_risk(&self) -> &CountMatrix {
        &self.left_inclusive_at_risk
    }
}

/// At-risk count for type `j` at bucket `k`: the plain at-risk count plus
/// every event of another type `r != j` recorded strictly before `k`.
fn inclusive_at_risk(at_risk: &[usize], events: &CountMatrix) -> CountMatrix {
    let (types, buckets) = events.dim();
    let mut out = CountMatrix::zeroed(types, buckets);
    let all_types = events.column_sums();
    let mut earlier_all = 0;
    let mut earlier_own = vec![0; types];
    for k in 0..buckets {
        for (j, own) in earlier_own.iter_mut().enumerate() {
            out.set(j, k, at_risk[k] + earlier_all - *own);
            *own += events.get(j, k);
        }
        earlier_all += all_types[k];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Membership::*;

    /// The straightforward quadruple loop over (type, bucket, earlier bucket, other type).
    fn inclusive_at_risk_naive(at_risk: &[usize], events: &CountMatrix) -> CountMatrix {
        let (types, buckets) = events.dim();
        let mut out = CountMatrix::zeroed(types, buckets);
        for k in 0..buckets {
            for j in 0..types {
                let mut total = at_risk[k];
                for s in 0..k {
                    for r in 0..types {
                        if r != j {
                            total += events.get(r, s);
                        }
                    }
                }
                out.set(j, k, total);
            }
        }
        out
    }

    #[test]
    fn counts_events_per_type() {
        let membership = [Left, Right, Left, Right, Left, Right];
        let time = [1.0, 1.0, 2.0, 3.0, 4.0, 4.0];
        let event = [1, 2, 2, 0, 1, 1];
        let event_times = [1.0, 2.0, 4.0];
        let view = SurvivalView {
            membership: &membership,
            time: &time,
            event: &event,
            event_times: &event_times,
        };
        let crs = CompetingRiskSet::tally(&view, 2).unwrap();

        assert_eq!(crs.event_type_size(), 2);
        assert_eq!(crs.parent_event().row(0).to_vec(), vec![1, 0, 2]);
        assert_eq!(crs.parent_event().row(1).to_vec(), vec![1, 1, 0]);
        assert_eq!(crs.left_event().row(0).to_vec(), vec![1, 0, 1]);
        assert_eq!(crs.left_event().row(1).to_vec(), vec![0, 1, 0]);
        assert_eq!(crs.risk_set().parent_at_risk().as_slice(), &[6, 4, 2]);

        // Type 1 at bucket 2 also counts the two type-2 events before it.
        assert_eq!(crs.parent_inclusive_at_risk().row(0).to_vec(), vec![6, 5, 4]);
        // Type 2 picks up the type-1 event at bucket 0.
        assert_eq!(crs.parent_inclusive_at_risk().row(1).to_vec(), vec![6, 5, 3]);
    }

    #[test]
    fn prefix_sums_match_the_naive_accumulation() {
        let mut events = CountMatrix::zeroed(3, 5);
        for (r, c, times) in [(0, 0, 2), (1, 0, 1), (2, 1, 3), (0, 3, 1), (1, 4, 2), (2, 2, 1)] {
            for _ in 0..times {
                events.increment(r, c);
            }
        }
        let at_risk = [20, 15, 11, 6, 3];
        assert_eq!(
            inclusive_at_risk(&at_risk, &events),
            inclusive_at_risk_naive(&at_risk, &events)
        );
    }

    #[test]
    fn single_type_inclusive_equals_plain_at_risk() {
        let membership = [Left, Right, Left, Right];
        let time = [1.0, 2.0, 2.0, 3.0];
        let event = [1, 0, 1, 1];
        let event_times = [1.0, 2.0, 3.0];
        let view = SurvivalView {
            membership: &membership,
            time: &time,
            event: &event,
            event_times: &event_times,
        };
        let crs = CompetingRiskSet::tally(&view, 1).unwrap();
        assert_eq!(
            crs.parent_inclusive_at_risk().row(0).to_vec(),
            crs.risk_set().parent_at_risk().as_slice().to_vec()
        );
        assert_eq!(
            crs.left_inclusive_at_risk().row(0).to_vec(),
            crs.risk_set().left_at_risk().as_slice().to_vec()
        );
    }

    #[test]
    fn rejects_event_codes_beyond_type_count() {
        let membership = [Left, Right];
        let time = [1.0, 2.0];
        let event = [1, 3];
        let event_times = [1.0, 2.0];
        let view = SurvivalView {
            membership: &membership,
            time: &time,
            event: &event,
            event_times: &event_times,
        };
        assert!(matches!(
            CompetingRiskSet::tally(&view, 2),
            Err(SplitStatisticError::EventTypeOutOfRange {
                code: 3,
                event_type_size: 2
            })
        ));
    }
}
