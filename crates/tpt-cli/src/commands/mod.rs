pub mod backends;
pub mod balance;
pub mod completions;
pub mod solve;
