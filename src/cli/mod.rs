pub mod careers;
pub mod compare;
pub mod convert;
pub mod rates;
pub mod setup;
pub mod ui;
