pub mod profile;
pub mod register;
pub mod session;
