//! Core business logic abstractions

pub mod cache;
pub mod clock;
pub mod config;
pub mod convert;
pub mod fallback;
pub mod log;
pub mod provider;
pub mod rate;
pub mod salary;
pub mod source;

// Re-export main types for cleaner imports
pub use cache::RateCache;
pub use clock::{Clock, FixedClock, SystemClock};
pub use convert::{ConversionError, convert};
pub use fallback::FallbackTable;
pub use provider::ExchangeRateProvider;
pub use rate::{ExchangeRate, Provenance, RateSnapshot};
pub use source::RateSource;
