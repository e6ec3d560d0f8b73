use std::net::Ipv4Addr;

pub mod responder;

/// the SSDP multicast group
pub const SSDP_MULTICAST_ADDR: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);

/// the SSDP port
pub const SSDP_PORT: u16 = 1900;

/// advertised validity of a discovery reply in seconds
pub const SSDP_MAX_AGE: u32 = 1200;
