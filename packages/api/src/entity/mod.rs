pub mod prelude;

pub mod application;
pub mod gamer_activity;
pub mod gamer_profile;
