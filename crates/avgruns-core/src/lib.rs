pub mod config;
pub mod error;
pub mod naming;
pub mod scans;
pub mod stage;
pub mod subject;

pub use config::RunConfig;
pub use error::{AvgRunsError, Result};
pub use scans::ScanSet;
pub use stage::Stage;
pub use subject::SubjectId;
