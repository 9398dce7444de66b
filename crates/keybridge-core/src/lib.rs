// Flat re-exports for the common entry points, so callers can write
// keybridge_core::compile without spelling out the module path.
pub use compiler::{compile, Variant, VariantSet};
pub use descriptor::KeyboardDescriptor;
pub use error::{CompileError, CompileResult};
pub use record::ConfigRecord;

// Internal Modules
pub mod compiler;
pub mod descriptor;
pub mod error;
pub mod pins;
pub mod record;
