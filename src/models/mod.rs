mod deal;
mod errors;
mod outcome;

pub use deal::{Deal, DealRequest, NewDeal};
pub use errors::DealError;
pub use outcome::{BatchOutcome, FailureKind, RecordOutcome};
