pub mod layout;
pub mod nifti_meta;
pub mod publish;

pub use layout::BidsLayout;
pub use nifti_meta::{check_same_grid, spatial_dims};
pub use publish::{is_fresh, publish};
