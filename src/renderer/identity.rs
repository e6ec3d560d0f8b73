use std::net::IpAddr;

use crate::globals::statics::{APP_NAME, APP_VERSION};

/// the static identity of the mocked device, shared read-only between the
/// discovery responder and the webserver
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RendererIdentity {
    /// name shown by control points
    pub friendly_name: String,
    /// unique device name, without the `uuid:` prefix
    pub udn: String,
    /// base url of the webserver, also the presentation url
    pub base_url: String,
    /// LOCATION of the device description served by the webserver
    pub location: String,
    /// SERVER product string used in discovery replies
    pub server: String,
}

impl RendererIdentity {
    #[must_use]
    pub fn new(friendly_name: &str, udn: &str, local_addr: &IpAddr, server_port: u16) -> Self {
        let base_url = format!("http://{local_addr}:{server_port}");
        RendererIdentity {
            friendly_name: friendly_name.to_string(),
            udn: udn.to_string(),
            location: format!("{base_url}/description.xml"),
            base_url,
            server: format!(
                "{}/1.0 UPnP/1.1 {APP_NAME}/{APP_VERSION}",
                std::env::consts::OS
            ),
        }
    }
}
