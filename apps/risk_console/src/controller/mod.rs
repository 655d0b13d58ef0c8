//! Controller layer: UI events, form flows, result presentation, history and asset overlays.

pub mod assets;
pub mod events;
pub mod forms;
pub mod history;
pub mod orchestration;
pub mod presenter;
