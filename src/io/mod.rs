// Purpose - audio devices at the edges of the pipeline

pub mod live;
pub mod output;

pub use live::LiveCapture;
pub use output::{MonitorStream, OutputDevice};
