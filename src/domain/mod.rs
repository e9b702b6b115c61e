pub mod account;
pub mod batch;
pub mod column;
pub mod error;
pub mod transaction;
