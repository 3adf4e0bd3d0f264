pub mod dashboard_components;
pub mod design_system;
pub mod ui;
