pub mod commandline;
pub mod configuration;
pub mod local_ip_address;
pub mod timefmt;
pub mod xmltext;
