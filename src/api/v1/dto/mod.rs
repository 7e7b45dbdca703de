pub mod calculations;
pub mod users;
