mod canonical_correlation;

pub use canonical_correlation::{
    CanonicalCorrelation, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, SvdFallback,
    leading_singular_value, orthonormal_basis,
};
