pub mod commands;
mod correlator;
mod queue;
mod task;

pub use correlator::ResultCorrelator;
pub use queue::TaskQueue;
pub use task::{AnalysisKind, AnalysisOutcome, AnalysisRequest, AnalysisStatus, AnalysisTask};
