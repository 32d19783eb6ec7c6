pub mod linalg;

pub use linalg::{LuError, SYSTEM_DIMENSION, SystemFactorization};

use faer::Mat;

pub type DenseMatrix = Mat<f64>;
