pub mod auth;
pub mod chatbot;
pub mod crops;
pub mod diary;
pub mod expenses;
pub mod farms;
pub mod health;
pub mod learning;
pub mod market_prices;
pub mod marketplace;
pub mod resources;
pub mod yield_records;
