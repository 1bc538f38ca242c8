pub mod cuisine;
pub mod event;
pub mod response;
pub mod slot;
pub mod tracker;
