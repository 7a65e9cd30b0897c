pub mod company;
pub mod user;
