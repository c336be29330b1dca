pub mod run;

pub use run::{InputSource, RunRequest, run};
