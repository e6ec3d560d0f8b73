use std::fmt;

/// transport state of the renderer, rendered with the UPnP AVTransport wire names
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TransportState {
    Stopped,
    Playing,
    PausedPlayback,
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportState::Stopped => write!(f, "STOPPED"),
            TransportState::Playing => write!(f, "PLAYING"),
            TransportState::PausedPlayback => write!(f, "PAUSED_PLAYBACK"),
        }
    }
}

/// the two controllable UPnP services the renderer exposes
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum UpnpService {
    AvTransport,
    RenderingControl,
}

impl UpnpService {
    /// the service type URN, also the namespace of its SOAP responses
    #[must_use]
    pub fn service_type(&self) -> &'static str {
        match self {
            UpnpService::AvTransport => "urn:schemas-upnp-org:service:AVTransport:1",
            UpnpService::RenderingControl => "urn:schemas-upnp-org:service:RenderingControl:1",
        }
    }

    /// the control URL this service is POSTed to
    #[must_use]
    pub fn control_path(&self) -> &'static str {
        match self {
            UpnpService::AvTransport => "/upnp/control/avtransport",
            UpnpService::RenderingControl => "/upnp/control/renderingcontrol",
        }
    }
}

impl fmt::Display for UpnpService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpnpService::AvTransport => write!(f, "AVTransport"),
            UpnpService::RenderingControl => write!(f, "RenderingControl"),
        }
    }
}
