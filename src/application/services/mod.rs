//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, CommandRunner)
//! but are themselves concrete structs, not traits.

mod artifacts;
mod descriptor;
mod scaffold;

pub use artifacts::{ArtifactKind, ArtifactService, GenerationReport};
pub use descriptor::DescriptorService;
pub use scaffold::ScaffoldService;
