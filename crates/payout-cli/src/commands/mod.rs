pub mod calculate;
pub mod catalog;
pub mod rates;
pub mod settings;
