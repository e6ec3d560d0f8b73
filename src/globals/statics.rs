use crate::utils::configuration::Configuration;

use std::sync::{LazyLock, RwLock};

/// app name, used in the log banner and the advertised SERVER product string
pub const APP_NAME: &str = "mockdmr-rs";

/// app version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// the default HTTP port for description and control
pub const SERVER_PORT: u16 = 8008;

/// the default UDN of the mocked device
pub const DEFAULT_UUID: &str = "c0ffee-5eed-0000-1111-222233334444";

/// UPnP type URNs of the mocked device and its services
pub const MEDIARENDERER_DEVICE_TYPE: &str = "urn:schemas-upnp-org:device:MediaRenderer:1";
pub const AVTRANSPORT_SERVICE_TYPE: &str = "urn:schemas-upnp-org:service:AVTransport:1";
pub const RENDERINGCONTROL_SERVICE_TYPE: &str = "urn:schemas-upnp-org:service:RenderingControl:1";
pub const CONNECTIONMANAGER_SERVICE_TYPE: &str = "urn:schemas-upnp-org:service:ConnectionManager:1";

// the global configuration state
pub static CONFIG: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::read_config()));
