pub mod driving_tip;
pub mod question;
pub mod resource;
pub mod scope;
pub mod state;
pub mod user;
