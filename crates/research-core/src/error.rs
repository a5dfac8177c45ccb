use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResearchError {
    /// Ticker outside the 1-10 character constraint. The only error that
    /// surfaces as a request-level rejection.
    #[error("Invalid ticker: {0}")]
    InvalidTicker(String),

    /// Transport-level failure talking to an external source. Converted
    /// inline to a restricted marker or null by the aggregator.
    #[error("Source error: {0}")]
    Source(String),

    /// Payload arrived but did not have the expected shape. Treated the
    /// same as a missing field downstream.
    #[error("Malformed payload: {0}")]
    Data(String),
}
