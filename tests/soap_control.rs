use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
    thread,
    time::Duration,
};

use crossbeam_channel::{Receiver, unbounded};
use mockdmr_rs::{
    enums::messages::MessageType,
    renderer::{identity::RendererIdentity, state::MockRenderer},
    server::control_server::ControlServer,
    utils::{timefmt::hhmmss_to_seconds, xmltext::element_text},
};
use ureq::Agent;

const AVTRANSPORT_URN: &str = "urn:schemas-upnp-org:service:AVTransport:1";
const RENDERINGCONTROL_URN: &str = "urn:schemas-upnp-org:service:RenderingControl:1";
const AV_CONTROL: &str = "/upnp/control/avtransport";
const RC_CONTROL: &str = "/upnp/control/renderingcontrol";
const TEST_UDN: &str = "c0ffee-5eed-0000-1111-222233334444";

/// boot a full control endpoint on a loopback port picked by the OS
fn start_renderer() -> (SocketAddr, Arc<MockRenderer>, Receiver<MessageType>) {
    let renderer = Arc::new(MockRenderer::new());
    let loopback = IpAddr::V4(Ipv4Addr::LOCALHOST);
    let identity = RendererIdentity::new("Mock Renderer", TEST_UDN, &loopback, 0);
    let (tx, rx) = unbounded();
    let server = ControlServer::bind(&loopback, 0, renderer.clone(), &identity, tx)
        .expect("bind the control server");
    let addr = server.server_addr().expect("a bound socket address");
    thread::spawn(move || server.run());
    (addr, renderer, rx)
}

/// an agent that hands back fault responses instead of erroring on HTTP 500
fn agent() -> Agent {
    Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .into()
}

fn soap_envelope(urn: &str, action: &str, arguments: &str) -> String {
    format!(
        "<?xml version=\"1.0\"?>\
         <s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\" \
         s:encodingStyle=\"http://schemas.xmlsoap.org/soap/encoding/\">\
         <s:Body><u:{action} xmlns:u=\"{urn}\">\
         <InstanceID>0</InstanceID>{arguments}\
         </u:{action}></s:Body></s:Envelope>"
    )
}

/// POST one SOAP action and return status code plus response body
fn invoke(addr: SocketAddr, path: &str, urn: &str, action: &str, arguments: &str) -> (u16, String) {
    let url = format!("http://{addr}{path}");
    let soap_action = format!("\"{urn}#{action}\"");
    let mut response = agent()
        .post(url.as_str())
        .header("Content-Type", "text/xml; charset=\"utf-8\"")
        .header("SOAPAction", soap_action.as_str())
        .send(soap_envelope(urn, action, arguments))
        .expect("SOAP request sent");
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .expect("a readable body");
    (status, body)
}

fn http_get(addr: SocketAddr, path: &str) -> (u16, String) {
    let url = format!("http://{addr}{path}");
    let mut response = agent().get(url.as_str()).call().expect("GET sent");
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .expect("a readable body");
    (status, body)
}

#[test]
fn position_advances_while_playing() {
    let (addr, _renderer, _rx) = start_renderer();
    invoke(
        addr,
        AV_CONTROL,
        AVTRANSPORT_URN,
        "SetAVTransportURI",
        "<CurrentURI>http://example.com/track.mp3</CurrentURI>\
         <CurrentURIMetaData></CurrentURIMetaData>",
    );
    invoke(addr, AV_CONTROL, AVTRANSPORT_URN, "Play", "<Speed>1</Speed>");
    thread::sleep(Duration::from_millis(2100));

    let (status, body) = invoke(addr, AV_CONTROL, AVTRANSPORT_URN, "GetPositionInfo", "");
    assert_eq!(status, 200);
    let rel_time = element_text(&body, "RelTime").expect("a RelTime field");
    let secs = hhmmss_to_seconds(&rel_time);
    assert!((2..=3).contains(&secs), "unexpected position {rel_time}");
    assert_eq!(
        element_text(&body, "TrackURI").as_deref(),
        Some("http://example.com/track.mp3")
    );

    let (_, info) = invoke(addr, AV_CONTROL, AVTRANSPORT_URN, "GetTransportInfo", "");
    assert_eq!(
        element_text(&info, "CurrentTransportState").as_deref(),
        Some("PLAYING")
    );
    assert_eq!(
        element_text(&info, "CurrentTransportStatus").as_deref(),
        Some("OK")
    );
}

#[test]
fn pause_freezes_the_reported_position() {
    let (addr, _renderer, _rx) = start_renderer();
    invoke(
        addr,
        AV_CONTROL,
        AVTRANSPORT_URN,
        "SetAVTransportURI",
        "<CurrentURI>http://example.com/track.mp3</CurrentURI>\
         <CurrentURIMetaData></CurrentURIMetaData>",
    );
    invoke(addr, AV_CONTROL, AVTRANSPORT_URN, "Play", "<Speed>1</Speed>");
    thread::sleep(Duration::from_millis(1200));
    invoke(addr, AV_CONTROL, AVTRANSPORT_URN, "Pause", "");

    let (_, body) = invoke(addr, AV_CONTROL, AVTRANSPORT_URN, "GetPositionInfo", "");
    let frozen = element_text(&body, "RelTime").expect("a RelTime field");
    assert!((1..=2).contains(&hhmmss_to_seconds(&frozen)));

    // paused position must not move with the wall clock
    thread::sleep(Duration::from_millis(400));
    let (_, body) = invoke(addr, AV_CONTROL, AVTRANSPORT_URN, "GetPositionInfo", "");
    assert_eq!(element_text(&body, "RelTime").as_deref(), Some(&*frozen));

    let (_, info) = invoke(addr, AV_CONTROL, AVTRANSPORT_URN, "GetTransportInfo", "");
    assert_eq!(
        element_text(&info, "CurrentTransportState").as_deref(),
        Some("PAUSED_PLAYBACK")
    );
}

#[test]
fn stop_rewinds_and_keeps_the_track() {
    let (addr, _renderer, _rx) = start_renderer();
    invoke(
        addr,
        AV_CONTROL,
        AVTRANSPORT_URN,
        "SetAVTransportURI",
        "<CurrentURI>http://example.com/track.mp3</CurrentURI>\
         <CurrentURIMetaData></CurrentURIMetaData>",
    );
    invoke(addr, AV_CONTROL, AVTRANSPORT_URN, "Play", "<Speed>1</Speed>");
    thread::sleep(Duration::from_millis(1100));
    invoke(addr, AV_CONTROL, AVTRANSPORT_URN, "Stop", "");

    let (_, body) = invoke(addr, AV_CONTROL, AVTRANSPORT_URN, "GetPositionInfo", "");
    assert_eq!(element_text(&body, "RelTime").as_deref(), Some("00:00:00"));
    assert_eq!(
        element_text(&body, "TrackURI").as_deref(),
        Some("http://example.com/track.mp3")
    );
    let (_, info) = invoke(addr, AV_CONTROL, AVTRANSPORT_URN, "GetTransportInfo", "");
    assert_eq!(
        element_text(&info, "CurrentTransportState").as_deref(),
        Some("STOPPED")
    );
}

#[test]
fn seek_sets_the_position() {
    let (addr, _renderer, _rx) = start_renderer();
    invoke(
        addr,
        AV_CONTROL,
        AVTRANSPORT_URN,
        "SetAVTransportURI",
        "<CurrentURI>http://example.com/track.mp3</CurrentURI>\
         <CurrentURIMetaData></CurrentURIMetaData>",
    );
    let (status, body) = invoke(
        addr,
        AV_CONTROL,
        AVTRANSPORT_URN,
        "Seek",
        "<Unit>REL_TIME</Unit><Target>00:01:05</Target>",
    );
    assert_eq!(status, 200);
    assert!(body.contains("SeekResponse"));

    let (_, body) = invoke(addr, AV_CONTROL, AVTRANSPORT_URN, "GetPositionInfo", "");
    assert_eq!(element_text(&body, "RelTime").as_deref(), Some("00:01:05"));
}

#[test]
fn volume_round_trips_with_clamping() {
    let (addr, _renderer, _rx) = start_renderer();
    invoke(
        addr,
        RC_CONTROL,
        RENDERINGCONTROL_URN,
        "SetVolume",
        "<Channel>Master</Channel><DesiredVolume>150</DesiredVolume>",
    );
    let (_, body) = invoke(
        addr,
        RC_CONTROL,
        RENDERINGCONTROL_URN,
        "GetVolume",
        "<Channel>Master</Channel>",
    );
    assert_eq!(element_text(&body, "CurrentVolume").as_deref(), Some("100"));

    invoke(
        addr,
        RC_CONTROL,
        RENDERINGCONTROL_URN,
        "SetVolume",
        "<Channel>Master</Channel><DesiredVolume>-5</DesiredVolume>",
    );
    let (_, body) = invoke(
        addr,
        RC_CONTROL,
        RENDERINGCONTROL_URN,
        "GetVolume",
        "<Channel>Master</Channel>",
    );
    assert_eq!(element_text(&body, "CurrentVolume").as_deref(), Some("0"));

    // an unparseable desired volume falls back to the power-on default
    invoke(
        addr,
        RC_CONTROL,
        RENDERINGCONTROL_URN,
        "SetVolume",
        "<Channel>Master</Channel><DesiredVolume>loud</DesiredVolume>",
    );
    let (_, body) = invoke(
        addr,
        RC_CONTROL,
        RENDERINGCONTROL_URN,
        "GetVolume",
        "<Channel>Master</Channel>",
    );
    assert_eq!(element_text(&body, "CurrentVolume").as_deref(), Some("20"));
}

#[test]
fn unknown_action_returns_the_upnp_fault() {
    let (addr, _renderer, _rx) = start_renderer();
    let (status, body) = invoke(addr, AV_CONTROL, AVTRANSPORT_URN, "FooBar", "");
    assert_eq!(status, 500);
    assert!(body.contains("<faultstring>UPnPError</faultstring>"));
    assert!(body.contains("<errorCode>401</errorCode>"));
    assert!(body.contains("<errorDescription>Invalid Action</errorDescription>"));
}

#[test]
fn action_names_are_case_sensitive() {
    let (addr, _renderer, _rx) = start_renderer();
    let (status, body) = invoke(addr, AV_CONTROL, AVTRANSPORT_URN, "play", "");
    assert_eq!(status, 500);
    assert!(body.contains("<errorCode>401</errorCode>"));
}

#[test]
fn unknown_paths_are_not_found() {
    let (addr, _renderer, _rx) = start_renderer();
    // only the AVTransport and RenderingControl control endpoints exist
    let (status, _) = invoke(
        addr,
        "/upnp/control/connectionmanager",
        "urn:schemas-upnp-org:service:ConnectionManager:1",
        "GetProtocolInfo",
        "",
    );
    assert_eq!(status, 404);
    let (status, _) = http_get(addr, "/nosuch.xml");
    assert_eq!(status, 404);
    let (status, _) = http_get(addr, AV_CONTROL);
    assert_eq!(status, 404);
}

#[test]
fn documents_are_served() {
    let (addr, _renderer, _rx) = start_renderer();
    let (status, description) = http_get(addr, "/description.xml");
    assert_eq!(status, 200);
    assert!(description.contains("<friendlyName>Mock Renderer</friendlyName>"));
    assert!(description.contains(&format!("<UDN>uuid:{TEST_UDN}</UDN>")));
    assert!(description.contains(AVTRANSPORT_URN));
    assert!(description.contains(RENDERINGCONTROL_URN));
    assert!(description.contains("urn:schemas-upnp-org:service:ConnectionManager:1"));

    // query strings are ignored when resolving a document
    let (status, _) = http_get(addr, "/description.xml?ts=1");
    assert_eq!(status, 200);

    for scpd in ["/avtransport.xml", "/renderingcontrol.xml", "/connectionmanager.xml"] {
        let (status, body) = http_get(addr, scpd);
        assert_eq!(status, 200, "missing document {scpd}");
        assert!(body.contains("<actionList>"));
    }
}

#[test]
fn missing_body_tags_fall_back_to_defaults() {
    let (addr, renderer, _rx) = start_renderer();
    let (status, _) = invoke(addr, AV_CONTROL, AVTRANSPORT_URN, "SetAVTransportURI", "");
    assert_eq!(status, 200);
    assert_eq!(renderer.transport_uri(), "");

    // a Seek without a target lands on 00:00:00
    let (status, _) = invoke(addr, AV_CONTROL, AVTRANSPORT_URN, "Seek", "");
    assert_eq!(status, 200);
    let (_, body) = invoke(addr, AV_CONTROL, AVTRANSPORT_URN, "GetPositionInfo", "");
    assert_eq!(element_text(&body, "RelTime").as_deref(), Some("00:00:00"));
}

#[test]
fn other_methods_are_rejected() {
    let (addr, _renderer, _rx) = start_renderer();
    let url = format!("http://{addr}/description.xml");
    let response = agent()
        .put(url.as_str())
        .send("")
        .expect("PUT sent");
    assert_eq!(response.status().as_u16(), 405);

    let url = format!("http://{addr}{AV_CONTROL}");
    let response = agent().delete(url.as_str()).call().expect("DELETE sent");
    assert_eq!(response.status().as_u16(), 405);
}

#[test]
fn feedback_reports_the_handled_actions() {
    let (addr, _renderer, rx) = start_renderer();
    invoke(
        addr,
        AV_CONTROL,
        AVTRANSPORT_URN,
        "SetAVTransportURI",
        "<CurrentURI>http://example.com/track.mp3</CurrentURI>\
         <CurrentURIMetaData></CurrentURIMetaData>",
    );
    invoke(addr, AV_CONTROL, AVTRANSPORT_URN, "Play", "<Speed>1</Speed>");
    invoke(
        addr,
        RC_CONTROL,
        RENDERINGCONTROL_URN,
        "GetVolume",
        "<Channel>Master</Channel>",
    );

    for expected in ["SetAVTransportURI", "Play", "GetVolume"] {
        match rx.recv_timeout(Duration::from_secs(2)) {
            Ok(MessageType::ControlMessage(fb)) => {
                assert_eq!(fb.action.as_str(), expected);
                assert_eq!(fb.remote_ip.as_str(), "127.0.0.1");
            }
            other => panic!("expected a control message for {expected}, got {other:?}"),
        }
    }
}
