pub mod api;
pub mod cli;
pub mod core;
pub mod dialogflow;
pub mod fulfillment;
pub mod google;
pub mod tokens;
