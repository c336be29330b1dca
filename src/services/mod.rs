pub mod grades;
pub mod imports;

pub use grades::GradeService;
pub use imports::ImportedInputs;
