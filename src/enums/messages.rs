use crate::{server::control_server::ControlFeedBack, ssdp::responder::SsdpFeedBack};

#[derive(Debug, Clone)]
pub enum MessageType {
    ControlMessage(ControlFeedBack),
    SsdpMessage(SsdpFeedBack),
}
