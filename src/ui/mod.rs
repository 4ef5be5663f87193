pub mod footer;
pub mod highlight;
pub mod overlay;
pub mod render_ui;
pub mod split_view;
pub mod theme;
