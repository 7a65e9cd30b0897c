pub mod admin;
pub mod company;
pub mod quote;
pub mod session;
pub mod user;
