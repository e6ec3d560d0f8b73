//! mockdmr-rs - a mock UPnP/DLNA MediaRenderer for integration testing
//!
//! answers SSDP discovery, serves the device and service descriptions, and
//! accepts AVTransport/RenderingControl SOAP actions against an in-memory
//! renderer whose playback position advances with wall clock time

pub mod enums;
pub mod globals;
pub mod renderer;
pub mod server;
pub mod ssdp;
pub mod utils;
