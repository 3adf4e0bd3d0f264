// Feature catalog and raw/validated inputs
pub mod features;

// Prediction history
pub mod history;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
