use std::{
    io::{self, Read},
    net::{IpAddr, SocketAddr},
    sync::Arc,
    thread,
};

use crossbeam_channel::Sender;
use ecow::EcoString;
use log::{debug, info, warn};
use tiny_http::{Header, Method, Request, Response, Server};

use crate::{
    enums::{messages::MessageType, upnp::UpnpService},
    renderer::{identity::RendererIdentity, state::MockRenderer},
    server::{
        soap,
        templates::{
            AVTRANSPORT_SCPD, CONNECTIONMANAGER_SCPD, RENDERINGCONTROL_SCPD,
            build_device_description,
        },
    },
};

/// feedback for one handled control action
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ControlFeedBack {
    pub remote_ip: EcoString,
    pub service: UpnpService,
    pub action: EcoString,
}

/// the bound control webserver, ready to `run`
///
/// binding is separate from serving so that a failure to claim the control
/// port surfaces before any thread is spawned
pub struct ControlServer {
    server: Arc<Server>,
    renderer: Arc<MockRenderer>,
    description: Arc<String>,
    feedback_tx: Sender<MessageType>,
}

impl ControlServer {
    /// `bind` - claim the control port and prebuild the description document
    pub fn bind(
        local_addr: &IpAddr,
        server_port: u16,
        renderer: Arc<MockRenderer>,
        identity: &RendererIdentity,
        feedback_tx: Sender<MessageType>,
    ) -> io::Result<ControlServer> {
        let addr = format!("{local_addr}:{server_port}");
        let server = Server::http(&addr).map_err(io::Error::other)?;
        info!("The control webserver is listening on http://{addr}/");
        Ok(ControlServer {
            server: Arc::new(server),
            renderer,
            description: Arc::new(build_device_description(identity)),
            feedback_tx,
        })
    }

    /// the address the webserver actually bound, port 0 requests resolve here
    #[must_use]
    pub fn server_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// `run` - serve requests until the process dies
    pub fn run(self) {
        let mut handles = Vec::new();
        // always have two threads ready to serve new requests
        for _ in 0..2 {
            let server = self.server.clone();
            let renderer = self.renderer.clone();
            let description = self.description.clone();
            let feedback_tx = self.feedback_tx.clone();
            handles.push(thread::spawn(move || {
                for rq in server.incoming_requests() {
                    handle_request(rq, &renderer, &description, &feedback_tx);
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
    }
}

fn handle_request(
    rq: Request,
    renderer: &MockRenderer,
    description: &str,
    feedback_tx: &Sender<MessageType>,
) {
    debug!("{:?} {} from {}", *rq.method(), rq.url(), remote_ip(&rq));
    match *rq.method() {
        Method::Get => get_request(rq, description),
        Method::Post => control_request(rq, renderer, feedback_tx),
        _ => invalid_request(rq),
    }
}

/// GET - serve the device description and the capability documents
fn get_request(rq: Request, description: &str) {
    // a query string is not significant for document paths
    let path = rq.url().split('?').next().unwrap_or_default().to_string();
    let document = match path.as_str() {
        "/description.xml" => Some(description),
        "/avtransport.xml" => Some(AVTRANSPORT_SCPD),
        "/renderingcontrol.xml" => Some(RENDERINGCONTROL_SCPD),
        "/connectionmanager.xml" => Some(CONNECTIONMANAGER_SCPD),
        _ => None,
    };
    match document {
        Some(doc) => respond_xml(rq, 200, doc),
        None => not_found(rq),
    }
}

/// POST - one SOAP control action, 200 for a response, 500 for a fault
fn control_request(mut rq: Request, renderer: &MockRenderer, feedback_tx: &Sender<MessageType>) {
    let url = rq.url().to_string();
    let service = match url.as_str() {
        "/upnp/control/avtransport" => UpnpService::AvTransport,
        "/upnp/control/renderingcontrol" => UpnpService::RenderingControl,
        _ => return not_found(rq),
    };
    let soap_action = rq
        .headers()
        .iter()
        .find(|h| h.field.equiv("SOAPAction"))
        .map(|h| h.value.as_str().trim_matches('"').to_string())
        .unwrap_or_default();
    let mut body = String::new();
    // body decode errors are not interesting for a test double
    let _ = rq.as_reader().read_to_string(&mut body);
    let remote_ip = remote_ip(&rq);
    info!("SOAPAction={soap_action} from {remote_ip}");

    match soap::dispatch(service, &soap_action, &body, renderer) {
        Ok(response) => respond_xml(rq, 200, &response),
        Err(fault) => {
            warn!(
                "{service} fault {} for action '{}'",
                fault.error_code,
                soap::action_name(&soap_action)
            );
            respond_xml(rq, 500, &fault.envelope());
        }
    }
    // report the handled action, dropped receivers are fine
    let _ = feedback_tx.send(MessageType::ControlMessage(ControlFeedBack {
        remote_ip,
        service,
        action: EcoString::from(soap::action_name(&soap_action)),
    }));
}

/// this request is not recognized, reject with an error 404
fn not_found(rq: Request) {
    info!("Unrecognized request '{}' from {}", rq.url(), remote_ip(&rq));
    let response = Response::new(
        tiny_http::StatusCode(404),
        std_headers(),
        io::empty(),
        Some(0),
        None,
    );
    respond(rq, response);
}

/// unsupported METHOD request
fn invalid_request(rq: Request) {
    info!(
        "Unsupported HTTP method request {:?} from {}",
        *rq.method(),
        remote_ip(&rq)
    );
    let response = Response::new(
        tiny_http::StatusCode(405),
        std_headers(),
        io::empty(),
        Some(0),
        None,
    );
    respond(rq, response);
}

fn respond_xml(rq: Request, status_code: u16, body: &str) {
    let mut headers = std_headers();
    headers
        .push(Header::from_bytes(&b"Content-Type"[..], &b"text/xml; charset=utf-8"[..]).unwrap());
    let response = Response::from_string(body).with_status_code(tiny_http::StatusCode(status_code));
    let response = headers
        .into_iter()
        .fold(response, |resp, header| resp.with_header(header));
    respond(rq, response);
}

fn respond<R: Read>(rq: Request, response: Response<R>) {
    if let Err(e) = rq.respond(response) {
        info!("=>Http connection terminated [{e}]");
    }
}

/// the standard headers
fn std_headers() -> Vec<Header> {
    let mut headers = Vec::with_capacity(4);
    headers.push(Header::from_bytes(&b"Server"[..], &b"mockdmr-rs tiny-http"[..]).unwrap());
    headers.push(Header::from_bytes(&b"Connection"[..], &b"close"[..]).unwrap());
    headers
}

fn remote_ip(rq: &Request) -> EcoString {
    rq.remote_addr()
        .map(|addr| EcoString::from(addr.ip().to_string()))
        .unwrap_or_default()
}
