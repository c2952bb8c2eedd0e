//! Shared fakes for engine integration tests: a scripted transport, a
//! recording media element, and recording presentation hooks.
#![allow(dead_code)] // each test binary uses a different subset

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use futures::channel::mpsc;
use futures::stream;
use url::Url;

use preroll_contracts::{
    ElementError, MediaElement, MediaResponse, MediaTransport,
    PresentationHooks, TransportError,
};
use preroll_core::{LoaderStats, MediaLoader};
use preroll_model::{ElementId, ItemSnapshot};

pub fn url(path: &str) -> Url {
    Url::parse(&format!("https://media.test/{path}")).unwrap()
}

/// Install a test-writer subscriber once; `RUST_LOG` controls verbosity.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One scripted response for a URL.
pub enum Script {
    /// Chunked body with an optional declared total.
    Chunks {
        total: Option<u64>,
        chunks: Vec<Vec<u8>>,
    },
    /// Body that fails mid-stream after the given chunks.
    BrokenBody { total: Option<u64>, chunks: Vec<Vec<u8>> },
    /// Request-level failure (non-success status).
    Status(u16),
    /// Body controlled by the test through a channel sender; the stream
    /// ends when the sender is dropped.
    Gated {
        total: Option<u64>,
        rx: mpsc::UnboundedReceiver<Vec<u8>>,
    },
}

/// Transport whose responses are scripted per URL and whose request order is
/// recorded.
#[derive(Default)]
pub struct ScriptedTransport {
    scripts: Mutex<HashMap<Url, Script>>,
    started: Mutex<Vec<Url>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn script(&self, url: Url, script: Script) {
        self.scripts.lock().unwrap().insert(url, script);
    }

    /// Script a gated body and keep the sender side for the test.
    pub fn gate(
        &self,
        url: Url,
        total: Option<u64>,
    ) -> mpsc::UnboundedSender<Vec<u8>> {
        let (tx, rx) = mpsc::unbounded();
        self.script(url, Script::Gated { total, rx });
        tx
    }

    /// URLs in the order their fetches started.
    pub fn started(&self) -> Vec<Url> {
        self.started.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaTransport for ScriptedTransport {
    async fn get(&self, url: &Url) -> Result<MediaResponse, TransportError> {
        self.started.lock().unwrap().push(url.clone());
        let script = self.scripts.lock().unwrap().remove(url);
        match script {
            Some(Script::Chunks { total, chunks }) => Ok(MediaResponse {
                total_len: total,
                body: stream::iter(chunks.into_iter().map(Ok)).boxed(),
            }),
            Some(Script::BrokenBody { total, chunks }) => {
                let ok = chunks.into_iter().map(Ok);
                let tail = std::iter::once(Err(TransportError::Body(
                    "connection reset".into(),
                )));
                Ok(MediaResponse {
                    total_len: total,
                    body: stream::iter(ok.chain(tail)).boxed(),
                })
            }
            Some(Script::Status(status)) => Err(TransportError::Status {
                status,
                url: url.to_string(),
            }),
            Some(Script::Gated { total, rx }) => Ok(MediaResponse {
                total_len: total,
                body: rx.map(Ok).boxed(),
            }),
            None => Err(TransportError::Request(format!(
                "no script for {url}"
            ))),
        }
    }
}

/// What the element currently holds as its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attached {
    Buffered(Vec<u8>),
    Remote(Url),
}

/// Scripted playback behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackScript {
    Starts,
    Rejected,
    Fails,
}

/// In-memory playable element that records what the loader does to it.
pub struct FakeElement {
    id: ElementId,
    source: Option<Url>,
    poster: Option<Url>,
    playback: PlaybackScript,
    attached: Mutex<Option<Attached>>,
}

impl FakeElement {
    pub fn new(source: Option<Url>) -> Arc<Self> {
        Arc::new(Self {
            id: ElementId::new(),
            source,
            poster: None,
            playback: PlaybackScript::Starts,
            attached: Mutex::new(None),
        })
    }

    pub fn with_playback(
        source: Option<Url>,
        playback: PlaybackScript,
    ) -> Arc<Self> {
        Arc::new(Self {
            id: ElementId::new(),
            source,
            poster: None,
            playback,
            attached: Mutex::new(None),
        })
    }

    pub fn attached(&self) -> Option<Attached> {
        self.attached.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaElement for FakeElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn deferred_source(&self) -> Option<Url> {
        self.source.clone()
    }

    fn poster(&self) -> Option<Url> {
        self.poster.clone()
    }

    async fn attach_buffered(
        &self,
        data: Vec<u8>,
    ) -> Result<(), ElementError> {
        *self.attached.lock().unwrap() = Some(Attached::Buffered(data));
        Ok(())
    }

    async fn attach_remote(&self, url: &Url) -> Result<(), ElementError> {
        *self.attached.lock().unwrap() = Some(Attached::Remote(url.clone()));
        Ok(())
    }

    async fn begin_playback(&self) -> Result<(), ElementError> {
        match self.playback {
            PlaybackScript::Starts => Ok(()),
            PlaybackScript::Rejected => Err(ElementError::PlaybackRejected(
                "autoplay blocked".into(),
            )),
            PlaybackScript::Fails => {
                Err(ElementError::Playback("decoder gave up".into()))
            }
        }
    }
}

/// Every presentation hook invocation, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookEvent {
    LoadingStart(ElementId),
    Progress(ElementId, u8),
    Success(ElementId),
    Fallback(ElementId),
    Cleanup(ElementId),
}

#[derive(Default)]
pub struct RecordingHooks {
    events: Mutex<Vec<HookEvent>>,
}

impl RecordingHooks {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<HookEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn progress_for(&self, id: ElementId) -> Vec<u8> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HookEvent::Progress(eid, pct) if eid == id => Some(pct),
                _ => None,
            })
            .collect()
    }

    pub fn contains(&self, event: &HookEvent) -> bool {
        self.events().contains(event)
    }
}

impl PresentationHooks for RecordingHooks {
    fn on_loading_start(&self, item: &ItemSnapshot) {
        self.events
            .lock()
            .unwrap()
            .push(HookEvent::LoadingStart(item.id));
    }

    fn on_progress(&self, item: &ItemSnapshot, percent: u8) {
        self.events
            .lock()
            .unwrap()
            .push(HookEvent::Progress(item.id, percent));
    }

    fn on_success(&self, item: &ItemSnapshot) {
        self.events.lock().unwrap().push(HookEvent::Success(item.id));
    }

    fn on_fallback(&self, item: &ItemSnapshot) {
        self.events
            .lock()
            .unwrap()
            .push(HookEvent::Fallback(item.id));
    }

    fn on_cleanup(&self, item: &ItemSnapshot) {
        self.events.lock().unwrap().push(HookEvent::Cleanup(item.id));
    }
}

/// Poll the loader until `cond` holds or a generous deadline passes.
pub async fn wait_for(
    loader: &MediaLoader,
    cond: impl Fn(LoaderStats) -> bool,
) {
    for _ in 0..400 {
        if cond(loader.stats().await) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("loader never reached expected state: {:?}", loader.stats().await);
}
