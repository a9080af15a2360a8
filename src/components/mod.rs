pub mod code_panel;
pub mod graph_view;
pub mod tooltip;

pub use code_panel::CodePanel;
pub use graph_view::GraphView;
pub use tooltip::Tooltip;
