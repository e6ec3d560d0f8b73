use std::{
    io,
    net::{Ipv4Addr, SocketAddr, UdpSocket},
    sync::Arc,
    thread,
    time::Duration,
};

use chrono::Utc;
use crossbeam_channel::Sender;
use ecow::EcoString;
use log::{debug, error, info, warn};

use crate::{
    enums::messages::MessageType,
    globals::statics::{
        AVTRANSPORT_SERVICE_TYPE, CONNECTIONMANAGER_SERVICE_TYPE, MEDIARENDERER_DEVICE_TYPE,
        RENDERINGCONTROL_SERVICE_TYPE,
    },
    renderer::identity::RendererIdentity,
    ssdp::{SSDP_MAX_AGE, SSDP_MULTICAST_ADDR, SSDP_PORT},
};

/// search reply template, one datagram per matched target
static SSDP_RESPONSE_TEMPLATE: &str = "HTTP/1.1 200 OK\r\n\
CACHE-CONTROL: max-age={max_age}\r\n\
DATE: {date}\r\n\
EXT:\r\n\
LOCATION: {location}\r\n\
SERVER: {server}\r\n\
ST: {st}\r\n\
USN: {usn}\r\n\r\n";

/// every identity this device answers searches for
const KNOWN_TARGETS: [&str; 6] = [
    MEDIARENDERER_DEVICE_TYPE,
    AVTRANSPORT_SERVICE_TYPE,
    RENDERINGCONTROL_SERVICE_TYPE,
    CONNECTIONMANAGER_SERVICE_TYPE,
    "upnp:rootdevice",
    "ssdp:all",
];

/// feedback for one answered search
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SsdpFeedBack {
    pub remote_ip: EcoString,
    pub st: EcoString,
}

/// the discovery responder, bound and ready to `run`
pub struct SsdpResponder {
    socket: UdpSocket,
    identity: Arc<RendererIdentity>,
    feedback_tx: Sender<MessageType>,
}

impl SsdpResponder {
    /// `bind` - claim the SSDP port and join the multicast group
    ///
    /// a busy port 1900 degrades to an ephemeral port: the responder then only
    /// sees searches aimed straight at it, so the fallback is logged loudly.
    /// a refused multicast join leaves unicast reception working
    pub fn bind(
        identity: Arc<RendererIdentity>,
        feedback_tx: Sender<MessageType>,
    ) -> io::Result<SsdpResponder> {
        let socket = match UdpSocket::bind((Ipv4Addr::UNSPECIFIED, SSDP_PORT)) {
            Ok(socket) => socket,
            Err(e) => {
                warn!("Port {SSDP_PORT} busy ({e}); SSDP responder falls back to an ephemeral port and will miss multicast searches");
                UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?
            }
        };
        if let Err(e) = socket.join_multicast_v4(&SSDP_MULTICAST_ADDR, &Ipv4Addr::UNSPECIFIED) {
            warn!("SSDP multicast join failed ({e}), continuing with unicast reception only");
        }
        if let Err(e) = socket.set_multicast_ttl_v4(2) {
            debug!("SSDP multicast ttl not set: {e}");
        }
        socket.set_nonblocking(true)?;
        Ok(SsdpResponder {
            socket,
            identity,
            feedback_tx,
        })
    }

    /// the address the responder actually bound
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// `run` - answer search datagrams until the process dies
    ///
    /// a single bad datagram or receive error never ends the loop
    pub fn run(&self) {
        info!(
            "SSDP responder listening on port {} as '{}' ({})",
            self.local_addr().map(|a| a.port()).unwrap_or_default(),
            self.identity.friendly_name,
            self.identity.udn
        );
        let mut buf = [0u8; 65_535];
        loop {
            match self.socket.recv_from(&mut buf) {
                Ok((received, from)) => {
                    let msg = String::from_utf8_lossy(&buf[..received]);
                    self.handle_search(&msg, from);
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(50));
                }
                Err(e) => {
                    error!("SSDP recv error: {e}");
                    thread::sleep(Duration::from_millis(200));
                }
            }
        }
    }

    /// answer one datagram if it is a discovery search matching an identity
    fn handle_search(&self, msg: &str, from: SocketAddr) {
        if !is_msearch(msg) {
            return;
        }
        let st = search_target(msg);
        let targets = match_targets(st.as_deref());
        debug!(
            "M-SEARCH for {st:?} from {from}, {} replies",
            targets.len()
        );
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        for target in &targets {
            let reply = SSDP_RESPONSE_TEMPLATE
                .replace("{max_age}", &SSDP_MAX_AGE.to_string())
                .replace("{date}", &date)
                .replace("{location}", &self.identity.location)
                .replace("{server}", &self.identity.server)
                .replace("{st}", target)
                .replace("{usn}", &usn_for(&self.identity.udn, target));
            if let Err(e) = self.socket.send_to(reply.as_bytes(), from) {
                debug!("SSDP reply to {from} failed: {e}");
            }
        }
        if !targets.is_empty() {
            // report the answered search, dropped receivers are fine
            let _ = self
                .feedback_tx
                .send(MessageType::SsdpMessage(SsdpFeedBack {
                    remote_ip: EcoString::from(from.ip().to_string()),
                    st: EcoString::from(st.unwrap_or_else(|| "ssdp:all".to_string())),
                }));
        }
    }
}

/// `is_msearch` - does this datagram ask for discovery
fn is_msearch(msg: &str) -> bool {
    msg.contains("M-SEARCH") && msg.contains("ssdp:discover")
}

/// `search_target` - the ST header value, header name in any case
fn search_target(msg: &str) -> Option<String> {
    msg.lines().find_map(|line| {
        if line.to_uppercase().starts_with("ST:") {
            line.splitn(2, ':').nth(1).map(|v| v.trim().to_string())
        } else {
            None
        }
    })
}

/// `match_targets` - which identities a search target selects
///
/// `ssdp:all` or an absent target selects every identity, anything else must
/// match a known identity exactly or goes unanswered
fn match_targets(st: Option<&str>) -> Vec<&'static str> {
    match st {
        None | Some("ssdp:all" | "") => KNOWN_TARGETS.to_vec(),
        Some(value) => KNOWN_TARGETS
            .iter()
            .copied()
            .filter(|known| *known == value)
            .collect(),
    }
}

/// `usn_for` - the unique service name advertised for a search target
fn usn_for(udn: &str, target: &str) -> String {
    if target == "upnp:rootdevice" {
        format!("uuid:{udn}")
    } else {
        format!("uuid:{udn}::{target}")
    }
}
