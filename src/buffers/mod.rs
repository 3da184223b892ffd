mod count_matrix;
mod count_vector;

pub use count_matrix::CountMatrix;
pub use count_vector::CountVector;
