pub use super::application::Entity as Application;
pub use super::gamer_activity::Entity as GamerActivity;
pub use super::gamer_profile::Entity as GamerProfile;
