pub mod calendar_panel;
pub mod severity_panel;
pub mod status_bar;
pub mod top_bar;
