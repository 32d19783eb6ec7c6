//! Atomic weights and numerical tolerances shared by the surrogate kernels.

pub const CARBON_ATOMIC_WEIGHT: f64 = 12.01;
pub const HYDROGEN_ATOMIC_WEIGHT: f64 = 1.008;
pub const OXYGEN_ATOMIC_WEIGHT: f64 = 15.999;

/// Slack allowed on `C + H <= 1` before a composition is rejected.
pub const COMPOSITION_SUM_SLACK: f64 = 1.0e-12;

pub const DEFAULT_NORMALIZATION_TOLERANCE: f64 = 1.0e-9;
pub const DEFAULT_MAX_CONDITION_NUMBER: f64 = 1.0e12;

/// Denominators below this magnitude are treated as a vanishing basis.
pub const VANISHING_BASIS_EPSILON: f64 = 1.0e-300;

pub const fn molecular_weight(carbon: f64, hydrogen: f64, oxygen: f64) -> f64 {
    carbon * CARBON_ATOMIC_WEIGHT + hydrogen * HYDROGEN_ATOMIC_WEIGHT + oxygen * OXYGEN_ATOMIC_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::{
        CARBON_ATOMIC_WEIGHT, HYDROGEN_ATOMIC_WEIGHT, OXYGEN_ATOMIC_WEIGHT, molecular_weight,
    };

    #[test]
    fn molecular_weight_is_linear_in_atom_counts() {
        assert_eq!(molecular_weight(1.0, 0.0, 0.0), CARBON_ATOMIC_WEIGHT);
        assert_eq!(molecular_weight(0.0, 1.0, 0.0), HYDROGEN_ATOMIC_WEIGHT);
        assert_eq!(molecular_weight(0.0, 0.0, 1.0), OXYGEN_ATOMIC_WEIGHT);

        let glucose_unit = molecular_weight(6.0, 10.0, 5.0);
        assert!((glucose_unit - 162.135).abs() < 1.0e-9);
    }
}
