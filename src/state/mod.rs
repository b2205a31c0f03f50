pub mod model;
pub mod overlay;
pub mod view;
