//! Care-pathway models: resource allocation and relapse load.

mod allocation;
mod error;
mod relapse;

pub use allocation::{AllocatedResources, ResourceAllocation, allocate};
pub use error::CareError;
pub use relapse::RelapseModel;
