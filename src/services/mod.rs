pub mod api;

pub use api::submit;
