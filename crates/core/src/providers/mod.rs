pub mod gateway;
pub mod traits;

// Price feed implementations
pub mod alphavantage;
pub mod mock;
