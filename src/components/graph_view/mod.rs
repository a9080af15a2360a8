mod component;
mod layout;
mod paint;

pub use component::GraphView;
