pub mod filter;
pub mod fold;
pub mod layout;
pub mod pointer;
pub mod render;
pub mod selection;
pub mod state;
pub mod viewport;
pub mod wrap;

pub use layout::{Layout, LayoutBuilder, LayoutItem};
pub use selection::{Position, Selection};
pub use state::ViewState;
pub use viewport::{Viewport, ViewportState};
