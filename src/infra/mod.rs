pub mod discord;
pub mod jenkins;
