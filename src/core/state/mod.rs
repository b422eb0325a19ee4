// State management and watermark tracking

pub mod key;
pub mod manager;
pub mod watermark;

pub use key::parameter_name;
pub use manager::{StateManager, StoredWatermark};
pub use watermark::{ExportWindow, Watermark};
