pub mod messages;
pub mod upnp;
