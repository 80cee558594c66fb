pub mod app;
pub mod components;
pub mod keys;

pub use app::App;
