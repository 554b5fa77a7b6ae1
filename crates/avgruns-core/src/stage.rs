//! Pipeline stages, in execution order.
//!
//! Each subject's pipeline moves through these stages in sequence; a
//! failure is reported against the stage it occurred in.

use std::fmt;

/// The five fixed stages of a subject's pipeline, plus the publish step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Locate scans on disk via the path template.
    Select,
    /// Split scans into reference and floating images.
    Split,
    /// Rigidly align each floating image to the reference.
    Register,
    /// Concatenate reference and aligned images into a 4-D volume.
    Assemble,
    /// Reduce the 4-D volume to the voxelwise mean.
    Average,
    /// Write the averaged image to its final location.
    Publish,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Select => "select",
            Stage::Split => "split",
            Stage::Register => "register",
            Stage::Assemble => "assemble",
            Stage::Average => "average",
            Stage::Publish => "publish",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
