use std::sync::Mutex;
use std::time::Instant;

use crate::enums::upnp::TransportState;

/// volume the renderer starts with, also the dispatcher fallback for `SetVolume`
pub const DEFAULT_VOLUME: u8 = 20;

/// snapshot returned by `transport_info`
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TransportInfo {
    pub state: TransportState,
    pub status: &'static str,
    pub speed: &'static str,
}

/// snapshot returned by `position_info`
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PositionInfo {
    pub duration_secs: u64,
    pub position_secs: u64,
    pub uri: String,
}

#[derive(Debug)]
struct RendererState {
    transport_uri: String,
    transport_metadata: String,
    transport_state: TransportState,
    track_duration_secs: u64,
    position_secs: u64,
    volume: u8,
    last_play_timestamp: Option<Instant>,
}

impl RendererState {
    fn new() -> RendererState {
        RendererState {
            transport_uri: String::new(),
            transport_metadata: String::new(),
            transport_state: TransportState::Stopped,
            track_duration_secs: 0,
            position_secs: 0,
            volume: DEFAULT_VOLUME,
            last_play_timestamp: None,
        }
    }

    // apparent position: the stored baseline plus wall clock elapsed while playing
    fn apparent_position(&self) -> u64 {
        match (self.transport_state, self.last_play_timestamp) {
            (TransportState::Playing, Some(started)) => {
                self.position_secs + started.elapsed().as_secs()
            }
            _ => self.position_secs,
        }
    }
}

/// the scripted renderer, one live instance per process
///
/// every operation takes the single state lock for one field update or read
/// and releases it before any I/O happens
#[derive(Debug)]
pub struct MockRenderer {
    state: Mutex<RendererState>,
}

impl MockRenderer {
    #[must_use]
    pub fn new() -> MockRenderer {
        MockRenderer {
            state: Mutex::new(RendererState::new()),
        }
    }

    /// `set_uri` - load a new transport URI, behaves like a fresh track load
    pub fn set_uri(&self, uri: &str, metadata: &str) {
        let mut state = self.state.lock().unwrap();
        state.transport_uri = uri.to_string();
        state.transport_metadata = metadata.to_string();
        state.transport_state = TransportState::Stopped;
        state.track_duration_secs = 0;
        state.position_secs = 0;
        state.last_play_timestamp = None;
    }

    /// `play` - start playing; playing an already playing renderer keeps the
    /// original elapsed-time baseline
    pub fn play(&self) {
        let mut state = self.state.lock().unwrap();
        if state.transport_state != TransportState::Playing {
            state.last_play_timestamp = Some(Instant::now());
            state.transport_state = TransportState::Playing;
        }
    }

    /// `pause` - fold elapsed seconds into the stored position and freeze it;
    /// pausing a stopped renderer still ends up PAUSED_PLAYBACK, position untouched
    pub fn pause(&self) {
        let mut state = self.state.lock().unwrap();
        if let (TransportState::Playing, Some(started)) =
            (state.transport_state, state.last_play_timestamp)
        {
            state.position_secs += started.elapsed().as_secs();
        }
        state.transport_state = TransportState::PausedPlayback;
        state.last_play_timestamp = None;
    }

    /// `stop` - back to STOPPED with the position rewound, uri and duration stay
    pub fn stop(&self) {
        let mut state = self.state.lock().unwrap();
        state.transport_state = TransportState::Stopped;
        state.position_secs = 0;
        state.last_play_timestamp = None;
    }

    /// `seek` - jump to an absolute position, negative targets clamp to 0
    ///
    /// while playing the elapsed-time baseline restarts at the seek point
    pub fn seek(&self, target_secs: i64) {
        let mut state = self.state.lock().unwrap();
        state.position_secs = target_secs.max(0) as u64;
        if state.transport_state == TransportState::Playing {
            state.last_play_timestamp = Some(Instant::now());
        }
    }

    #[must_use]
    pub fn transport_info(&self) -> TransportInfo {
        let state = self.state.lock().unwrap();
        TransportInfo {
            state: state.transport_state,
            status: "OK",
            speed: "OK",
        }
    }

    #[must_use]
    pub fn position_info(&self) -> PositionInfo {
        let state = self.state.lock().unwrap();
        PositionInfo {
            duration_secs: state.track_duration_secs,
            position_secs: state.apparent_position(),
            uri: state.transport_uri.clone(),
        }
    }

    /// `set_volume` - clamped into 0..=100 on every write
    pub fn set_volume(&self, desired: i64) {
        let mut state = self.state.lock().unwrap();
        state.volume = desired.clamp(0, 100) as u8;
    }

    #[must_use]
    pub fn volume(&self) -> u8 {
        self.state.lock().unwrap().volume
    }

    #[must_use]
    pub fn transport_state(&self) -> TransportState {
        self.state.lock().unwrap().transport_state
    }

    #[must_use]
    pub fn transport_uri(&self) -> String {
        self.state.lock().unwrap().transport_uri.clone()
    }

    #[must_use]
    pub fn transport_metadata(&self) -> String {
        self.state.lock().unwrap().transport_metadata.clone()
    }

    /// `set_track_duration` - script the duration a test scenario wants reported,
    /// no SOAP action ever writes it
    pub fn set_track_duration(&self, secs: u64) {
        self.state.lock().unwrap().track_duration_secs = secs;
    }
}

impl Default for MockRenderer {
    fn default() -> Self {
        Self::new()
    }
}
