use crate::buffers::CountVector;
use crate::core::SurvivalView;

/// Walks individuals and event times backwards together and calls
/// `visit(individual, bucket, at_event_time)` once for every individual that
/// is at risk at some event time.
///
/// Both `time` and `event_times` must be ascending. Each individual lands in
/// the last event-time bucket not after its own time; individuals observed
/// before the first event time are never visited.
pub(crate) fn sweep_at_risk(
    time: &[f64],
    event_times: &[f64],
    mut visit: impl FnMut(usize, usize, bool),
) {
    let mut i = time.len();
    let mut k = event_times.len();
    while i > 0 && k > 0 {
        let bucket_time = event_times[k - 1];
        if bucket_time <= time[i - 1] {
            visit(i - 1, k - 1, bucket_time == time[i - 1]);
            i -= 1;
        } else {
            k -= 1;
        }
    }
}

/// Per event time at-risk and event counts for the parent node and for its
/// LEFT daughter.
///
/// After [`RiskSet::tally`] the at-risk counts are cumulative: bucket `k`
/// counts everyone still under observation at `event_times[k]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskSet {
    parent_at_risk: CountVector,
    left_at_risk: CountVector,
    parent_event: CountVector,
    left_event: CountVector,
}

impl RiskSet {
    pub fn zeroed(buckets: usize) -> Self {
        Self {
            parent_at_risk: CountVector::zeroed(buckets),
            left_at_risk: CountVector::zeroed(buckets),
            parent_event: CountVector::zeroed(buckets),
            left_event: CountVector::zeroed(buckets),
        }
    }

    pub fn tally(view: &SurvivalView<'_>) -> Self {
        Self::tally_observing(view, |_, _| {})
    }

    /// Like [`RiskSet::tally`], additionally reporting every
    /// `(individual, bucket)` pair at which an event is recorded.
    pub(crate) fn tally_observing(
        view: &SurvivalView<'_>,
        mut on_event: impl FnMut(usize, usize),
    ) -> Self {
        let mut risk_set = Self::zeroed(view.event_times.len());
        sweep_at_risk(view.time, view.event_times, |i, k, at_event_time| {
            let left = view.membership[i].is_left();
            risk_set.parent_at_risk.increment(k);
            if left {
                risk_set.left_at_risk.increment(k);
            }
            if at_event_time && view.event[i] > 0 {
                risk_set.parent_event.increment(k);
                if left {
                    risk_set.left_event.increment(k);
                }
                on_event(i, k);
            }
        });
        risk_set.parent_at_risk.accumulate_from_end();
        risk_set.left_at_risk.accumulate_from_end();
        risk_set
    }

    #[inline]
    pub fn buckets(&self) -> usize {
        self.parent_at_risk.len()
    }

    pub fn parent_at_risk(&self) -> &CountVector {
        &self.parent_at_risk
    }

    pub fn left_at_risk(&self) -> &CountVector {
        &self.left_at_risk
    }

    pub fn parent_event(&self) -> &CountVector {
        &self.parent_event
    }

    pub fn left_event(&self) -> &CountVector {
        &self.left_event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Membership::{self, *};
    use crate::testing::fixtures::synthetic_survival;

    fn view<'a>(
        membership: &'a [Membership],
        time: &'a [f64],
        event: &'a [u32],
        event_times: &'a [f64],
    ) -> SurvivalView<'a> {
        SurvivalView {
            membership,
            time,
            event,
            event_times,
        }
    }

    #[test]
    fn sweep_assigns_each_individual_to_one_bucket() {
        let time = [0.5, 1.0, 1.5, 2.0, 3.0];
        let event_times = [1.0, 2.0];
        let mut visits = Vec::new();
        sweep_at_risk(&time, &event_times, |i, k, hit| visits.push((i, k, hit)));
        assert_eq!(
            visits,
            vec![
                (4, 1, false),
                (3, 1, true),
                (2, 0, false),
                (1, 0, true),
            ]
        );
    }

    #[test]
    fn tally_counts_events_and_cumulative_risk() {
        let membership = [Left, Right, Left, Right, Left];
        let time = [1.0, 1.0, 2.0, 3.0, 3.0];
        let event = [1, 1, 0, 1, 0];
        let event_times = [1.0, 3.0];
        let rs = RiskSet::tally(&view(&membership, &time, &event, &event_times));

        assert_eq!(rs.buckets(), 2);
        assert_eq!(rs.parent_at_risk().as_slice(), &[5, 2]);
        assert_eq!(rs.left_at_risk().as_slice(), &[3, 1]);
        assert_eq!(rs.parent_event().as_slice(), &[2, 1]);
        assert_eq!(rs.left_event().as_slice(), &[1, 0]);
    }

    #[test]
    fn censored_at_event_time_is_at_risk_but_not_an_event() {
        let membership = [Left, Left];
        let time = [2.0, 2.0];
        let event = [0, 1];
        let event_times = [2.0];
        let rs = RiskSet::tally(&view(&membership, &time, &event, &event_times));
        assert_eq!(rs.parent_at_risk().as_slice(), &[2]);
        assert_eq!(rs.parent_event().as_slice(), &[1]);
        assert_eq!(rs.left_event().as_slice(), &[1]);
    }

    #[test]
    fn observing_reports_every_event() {
        let membership = [Left, Right, Left];
        let time = [1.0, 2.0, 2.0];
        let event = [1, 2, 0];
        let event_times = [1.0, 2.0];
        let mut seen = Vec::new();
        RiskSet::tally_observing(&view(&membership, &time, &event, &event_times), |i, k| {
            seen.push((i, k))
        });
        seen.sort_unstable();
        assert_eq!(seen, vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn at_risk_counts_are_step_functions() {
        for seed in 0..20 {
            let owned = synthetic_survival(seed, 40, 1);
            let sample = owned.view();
            let survival = sample.survival().unwrap();
            assert!(survival.event_times.len() >= 2);
            let rs = RiskSet::tally(&survival);
            assert!(rs.parent_at_risk().is_non_increasing(), "seed {seed}");
            assert!(rs.left_at_risk().is_non_increasing(), "seed {seed}");
            for k in 0..rs.buckets() {
                assert!(rs.left_at_risk().get(k) <= rs.parent_at_risk().get(k));
                assert!(rs.parent_event().get(k) <= rs.parent_at_risk().get(k));
                assert!(rs.parent_event().get(k) >= 1);
            }
        }
    }
}
