pub mod prediction;
pub mod reading;

pub use prediction::{PredictionInput, PredictionResult, StoredPayload};
pub use reading::{NewReading, Reading};
