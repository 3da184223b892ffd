use crate::core::membership::Membership;
use crate::core::node_sample::NodeSample;
use crate::split_statistics::SplitStatisticError;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// JSON form of one node sample.
///
/// Convenience values left out of the record (`mean`, `variance`,
/// `max_level`, `event_times`, `event_type_size`) are derived from the
/// observation columns when the record is turned into an [`OwnedNodeSample`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSampleRecord {
    pub membership: Vec<Membership>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_times: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_level: Option<usize>,
    /// One inner vector per feature row, each with one value per observation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<Vec<f64>>>,
}

/// Owned node sample; [`OwnedNodeSample::view`] lends it out as a [`NodeSample`].
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedNodeSample {
    membership: Vec<Membership>,
    time: Option<Vec<f64>>,
    event: Option<Vec<u32>>,
    event_times: Vec<f64>,
    event_type_size: usize,
    response: Option<Vec<f64>>,
    mean: f64,
    variance: f64,
    max_level: usize,
    features: Option<Array2<f64>>,
}

impl OwnedNodeSample {
    pub fn view(&self) -> NodeSample<'_> {
        let mut sample = NodeSample::new(&self.membership)
            .with_max_level(self.max_level)
            .with_event_type_size(self.event_type_size);
        if let Some(response) = self.response.as_deref() {
            sample = sample.with_response(response, self.mean, self.variance);
        }
        if let (Some(time), Some(event)) = (self.time.as_deref(), self.event.as_deref()) {
            sample = sample.with_survival(time, event, &self.event_times);
        }
        if let Some(features) = self.features.as_ref() {
            sample = sample.with_features(features.view());
        }
        sample
    }

    pub fn membership(&self) -> &[Membership] {
        &self.membership
    }

    /// Replaces the candidate split, keeping every observation column.
    pub fn set_membership(&mut self, membership: Vec<Membership>) -> Result<(), SplitStatisticError> {
        if membership.len() != self.membership.len() {
            return Err(SplitStatisticError::LengthMismatch {
                field: "membership",
                expected: self.membership.len(),
                found: membership.len(),
            });
        }
        self.membership = membership;
        Ok(())
    }

    /// The same node with LEFT and RIGHT exchanged.
    pub fn swapped(&self) -> Self {
        let mut out = self.clone();
        out.membership.iter_mut().for_each(|m| *m = m.swapped());
        out
    }
}

impl TryFrom<NodeSampleRecord> for OwnedNodeSample {
    type Error = SplitStatisticError;

    fn try_from(record: NodeSampleRecord) -> Result<Self, Self::Error> {
        let NodeSampleRecord {
            mut membership,
            mut time,
            mut event,
            event_times,
            event_type_size,
            mut response,
            mean,
            variance,
            max_level,
            features,
        } = record;
        let n = membership.len();

        let check = |field: &'static str, found: usize| {
            if found == n {
                Ok(())
            } else {
                Err(SplitStatisticError::LengthMismatch {
                    field,
                    expected: n,
                    found,
                })
            }
        };
        if let Some(v) = &time {
            check("time", v.len())?;
        }
        if let Some(v) = &event {
            check("event", v.len())?;
        }
        if let Some(v) = &response {
            check("response", v.len())?;
        }
        let mut features = match features {
            Some(rows) => {
                for row in &rows {
                    check("features", row.len())?;
                }
                Some(Array2::from_shape_fn((rows.len(), n), |(r, c)| rows[r][c]))
            }
            None => None,
        };

        if time.is_some() != event.is_some() {
            return Err(SplitStatisticError::MissingInput(if time.is_some() {
                "event"
            } else {
                "time"
            }));
        }

        // Observations must arrive in ascending time order.
        if let Some(t) = &time {
            if !t.windows(2).all(|w| w[0] <= w[1]) {
                let mut order: Vec<usize> = (0..n).collect();
                order.sort_by(|&a, &b| t[a].total_cmp(&t[b]));
                membership = permute(&membership, &order);
                time = time.map(|v| permute(&v, &order));
                event = event.map(|v| permute(&v, &order));
                response = response.map(|v| permute(&v, &order));
                features = features.map(|f| f.select(ndarray::Axis(1), &order));
            }
        }

        let (derived_mean, derived_variance) = response
            .as_deref()
            .map(mean_and_variance)
            .unwrap_or((0.0, 0.0));
        let event_times = match (event_times, &time, &event) {
            (Some(mut given), _, _) => {
                given.sort_by(f64::total_cmp);
                given.dedup();
                given
            }
            (None, Some(t), Some(e)) => distinct_event_times(t, e),
            _ => Vec::new(),
        };
        let event_type_size = event_type_size.unwrap_or_else(|| {
            event
                .as_deref()
                .and_then(|e| e.iter().copied().max())
                .map_or(1, |code| (code as usize).max(1))
        });
        let max_level = max_level.unwrap_or_else(|| {
            response
                .as_deref()
                .map_or(0, highest_level)
        });

        Ok(Self {
            membership,
            time,
            event,
            event_times,
            event_type_size,
            response,
            mean: mean.unwrap_or(derived_mean),
            variance: variance.unwrap_or(derived_variance),
            max_level,
            features,
        })
    }
}

fn permute<T: Copy>(values: &[T], order: &[usize]) -> Vec<T> {
    order.iter().map(|&i| values[i]).collect()
}

/// Mean and population variance (divisor `n`) of a response column.
pub fn mean_and_variance(response: &[f64]) -> (f64, f64) {
    if response.is_empty() {
        return (0.0, 0.0);
    }
    let n = response.len() as f64;
    let mean = response.iter().sum::<f64>() / n;
    let variance = response.iter().map(|y| (y - mean).powi(2)).sum::<f64>() / n;
    (mean, variance)
}

/// Largest factor level encoded in a response column.
pub fn highest_level(response: &[f64]) -> usize {
    response
        .iter()
        .filter(|y| y.is_finite() && **y >= 1.0)
        .map(|&y| y as usize)
        .max()
        .unwrap_or(0)
}

/// Sorted, de-duplicated times at which at least one event (code > 0) occurred.
pub fn distinct_event_times(time: &[f64], event: &[u32]) -> Vec<f64> {
    let mut out: Vec<f64> = time
        .iter()
        .zip(event)
        .filter(|(_, e)| **e > 0)
        .map(|(t, _)| *t)
        .collect();
    out.sort_by(f64::total_cmp);
    out.dedup();
    out
}
