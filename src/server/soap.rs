use crate::{
    enums::upnp::UpnpService,
    renderer::state::{DEFAULT_VOLUME, MockRenderer},
    utils::{
        timefmt::{hhmmss_to_seconds, seconds_to_hhmmss},
        xmltext::element_text,
    },
};

/// SOAP success envelope template
static SOAP_RESPONSE_TEMPLATE: &str = "\
<?xml version=\"1.0\" encoding=\"utf-8\"?>\
<s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\" s:encodingStyle=\"http://schemas.xmlsoap.org/soap/encoding/\">\
<s:Body>\
{action_response}\
</s:Body>\
</s:Envelope>";

/// SOAP fault envelope template
static SOAP_FAULT_TEMPLATE: &str = "\
<?xml version=\"1.0\"?>\
<s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\">\
<s:Body>\
<s:Fault>\
<faultcode>s:Client</faultcode>\
<faultstring>UPnPError</faultstring>\
<detail>\
<UPnPError xmlns=\"urn:schemas-upnp-org:control-1-0\">\
<errorCode>{error_code}</errorCode>\
<errorDescription>{error_description}</errorDescription>\
</UPnPError>\
</detail>\
</s:Fault>\
</s:Body>\
</s:Envelope>";

/// a UPnP control fault, rendered on the wire as the classic SOAP fault envelope
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SoapFault {
    pub error_code: u16,
    pub error_description: &'static str,
}

impl SoapFault {
    /// error 401, the answer to any action the service does not know
    #[must_use]
    pub fn invalid_action() -> SoapFault {
        SoapFault {
            error_code: 401,
            error_description: "Invalid Action",
        }
    }

    /// `envelope` - render the fault envelope
    #[must_use]
    pub fn envelope(&self) -> String {
        SOAP_FAULT_TEMPLATE
            .replace("{error_code}", &self.error_code.to_string())
            .replace("{error_description}", self.error_description)
    }
}

/// `action_name` - the significant suffix of a SOAPACTION header value
///
/// the value is a namespaced URI ending in `#ActionName` (quotes already
/// stripped); a value without `#` carries no action name and will fault
#[must_use]
pub fn action_name(soap_action: &str) -> &str {
    match soap_action.split_once('#') {
        Some((_, name)) => name,
        None => "",
    }
}

/// `dispatch` - run one control action against the renderer
///
/// action names match case sensitively per service; parameters are pulled from
/// the body with `element_text`, absent ones fall back to their defaults
pub fn dispatch(
    service: UpnpService,
    soap_action: &str,
    body: &str,
    renderer: &MockRenderer,
) -> Result<String, SoapFault> {
    let action = action_name(soap_action);
    match service {
        UpnpService::AvTransport => avtransport_action(action, body, renderer),
        UpnpService::RenderingControl => renderingcontrol_action(action, body, renderer),
    }
}

fn avtransport_action(
    action: &str,
    body: &str,
    renderer: &MockRenderer,
) -> Result<String, SoapFault> {
    let service = UpnpService::AvTransport;
    match action {
        "SetAVTransportURI" => {
            let uri = element_text(body, "CurrentURI").unwrap_or_default();
            let metadata = element_text(body, "CurrentURIMetaData").unwrap_or_default();
            renderer.set_uri(&uri, &metadata);
            Ok(empty_response(service, action))
        }
        "Play" => {
            renderer.play();
            Ok(empty_response(service, action))
        }
        "Pause" => {
            renderer.pause();
            Ok(empty_response(service, action))
        }
        "Stop" => {
            renderer.stop();
            Ok(empty_response(service, action))
        }
        "Seek" => {
            let target = element_text(body, "Target").unwrap_or_else(|| "00:00:00".to_string());
            renderer.seek(hhmmss_to_seconds(&target));
            Ok(empty_response(service, action))
        }
        "GetTransportInfo" => {
            let ti = renderer.transport_info();
            let fields = format!(
                "<CurrentTransportState>{}</CurrentTransportState>\
                <CurrentTransportStatus>{}</CurrentTransportStatus>\
                <CurrentSpeed>{}</CurrentSpeed>",
                ti.state, ti.status, ti.speed
            );
            Ok(fields_response(service, action, &fields))
        }
        "GetPositionInfo" => {
            let pi = renderer.position_info();
            let position = seconds_to_hhmmss(pi.position_secs);
            let fields = format!(
                "<Track>1</Track>\
                <TrackDuration>{}</TrackDuration>\
                <TrackMetaData></TrackMetaData>\
                <TrackURI>{}</TrackURI>\
                <RelTime>{position}</RelTime>\
                <AbsTime>{position}</AbsTime>\
                <RelCount>0</RelCount>\
                <AbsCount>0</AbsCount>",
                seconds_to_hhmmss(pi.duration_secs),
                htmlescape::encode_minimal(&pi.uri),
            );
            Ok(fields_response(service, action, &fields))
        }
        _ => Err(SoapFault::invalid_action()),
    }
}

fn renderingcontrol_action(
    action: &str,
    body: &str,
    renderer: &MockRenderer,
) -> Result<String, SoapFault> {
    let service = UpnpService::RenderingControl;
    match action {
        "SetVolume" => {
            let desired = element_text(body, "DesiredVolume")
                .and_then(|v| v.trim().parse::<i64>().ok())
                .unwrap_or(i64::from(DEFAULT_VOLUME));
            renderer.set_volume(desired);
            Ok(empty_response(service, action))
        }
        "GetVolume" => {
            let fields = format!("<CurrentVolume>{}</CurrentVolume>", renderer.volume());
            Ok(fields_response(service, action, &fields))
        }
        _ => Err(SoapFault::invalid_action()),
    }
}

/// success envelope with a bare `<u:...Response/>`
fn empty_response(service: UpnpService, action: &str) -> String {
    let response = format!(
        "<u:{action}Response xmlns:u=\"{}\"/>",
        service.service_type()
    );
    SOAP_RESPONSE_TEMPLATE.replace("{action_response}", &response)
}

/// success envelope with response arguments
fn fields_response(service: UpnpService, action: &str, fields: &str) -> String {
    let response = format!(
        "<u:{action}Response xmlns:u=\"{}\">{fields}</u:{action}Response>",
        service.service_type()
    );
    SOAP_RESPONSE_TEMPLATE.replace("{action_response}", &response)
}
