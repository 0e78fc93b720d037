pub mod progress;
pub mod table;

pub use progress::{OperationStatus, ProgressTracker, display_status};
pub use table::TableDisplay;
