pub mod chart_panel;
pub mod feature_form;
pub mod logs_panel;
pub mod prediction_card;
