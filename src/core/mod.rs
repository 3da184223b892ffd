mod membership;
mod node_sample;
mod node_sample_record;
mod outcome_family;

pub use membership::{Membership, side_sizes};
pub use node_sample::{NodeSample, SurvivalView};
pub use node_sample_record::{
    NodeSampleRecord, OwnedNodeSample, distinct_event_times, highest_level, mean_and_variance,
};
pub use outcome_family::OutcomeFamily;
