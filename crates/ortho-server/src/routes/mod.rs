pub mod health;
pub mod legacy;
pub mod patients;
pub mod plans;
pub mod profiles;
pub mod sessions;
