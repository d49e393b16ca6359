pub mod analytics_service;
pub mod portfolio_service;
pub mod transcode_service;
pub mod valuation_service;
