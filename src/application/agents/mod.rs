// UI-side session driver
pub mod dashboard_agent;
