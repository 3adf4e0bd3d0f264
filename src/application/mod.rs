// Agent modules - UI-thread drivers
pub mod agents;

// Prediction session state machine
pub mod input_state;
pub mod orchestrator;
pub mod session;

// Background request execution
pub mod dispatcher;
