pub mod control_server;
pub mod soap;
pub mod templates;
