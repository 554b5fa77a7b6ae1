pub mod fsl;
pub mod graph;
pub mod report;
pub mod runner;
pub mod tools;

pub use fsl::{Flirt, FslVolumes};
pub use report::{Outcome, RunSummary, SubjectReport};
pub use runner::Pipeline;
pub use tools::{AlignParams, Interp, RegistrationTool, VolumeTool};
