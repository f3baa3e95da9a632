pub mod app;
pub mod camera_controls;
pub mod control_panel;
pub mod flat_layer;
pub mod instructions;
pub mod scene_layer;
pub mod star_field;
pub mod tech_label;
pub mod tech_map;
