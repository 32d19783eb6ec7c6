pub mod calibration;
pub mod constants;
pub mod species;
