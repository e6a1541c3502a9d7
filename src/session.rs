//! Fingerprint session
//!
//! Owns one composite at a time and wires the three injected
//! capabilities together: the signal source (collectors), the session
//! hash store (cache gate), and the report sink (remote reporter).
//!
//! Public operations never throw for collector or network failure; the
//! only surfaced error is a failed canonical serialization.

use crate::cache::HashStore;
use crate::collect::SignalSource;
use crate::composite::CompositeFingerprint;
use crate::config::CollectorConfig;
use crate::error::{FingerprintError, Result};
use crate::hash;

use crate::reporter::ReportSink;

pub struct FingerprintSession<S, K, R> {
    source: S,
    store: K,
    reporter: R,
    config: CollectorConfig,
    fingerprint: Option<CompositeFingerprint>,
}

impl<S, K, R> FingerprintSession<S, K, R>
where
    S: SignalSource,
    K: HashStore,
    R: ReportSink,
{
    pub fn new(source: S, store: K, reporter: R, config: CollectorConfig) -> Self {
        Self {
            source,
            store,
            reporter,
            config,
            fingerprint: None,
        }
    }

    /// The composite from the last `generate` call, if any.
    pub fn fingerprint(&self) -> Option<&CompositeFingerprint> {
        self.fingerprint.as_ref()
    }

    /// Recompute the full composite: run every configured collector once,
    /// derive the identity hash from the canonical serialization, and
    /// overwrite the session's fingerprint slot.
    pub async fn generate(&mut self) -> Result<CompositeFingerprint> {
        let mut composite = self.collect().await;

        let canonical = composite.canonical_json()?;
        composite.set_hash(hash::digest(self.config.hash, &canonical));

        log::debug!("generated fingerprint over {} bytes of signals", canonical.len());
        self.fingerprint = Some(composite.clone());
        Ok(composite)
    }

    /// Return the existing hash, generating first only when the in-memory
    /// composite does not carry one yet.
    pub async fn get_hash(&mut self) -> Result<String> {
        if let Some(hash) = self.fingerprint.as_ref().and_then(|fp| fp.hash()) {
            return Ok(hash.to_string());
        }
        let composite = self.generate().await?;
        composite
            .hash()
            .map(str::to_string)
            .ok_or_else(|| FingerprintError::Internal("hash missing after generate".into()))
    }

    /// Return the existing composite, generating first when needed.
    pub async fn get_data(&mut self) -> Result<CompositeFingerprint> {
        if let Some(fp) = self.fingerprint.as_ref().filter(|fp| fp.hash().is_some()) {
            return Ok(fp.clone());
        }
        self.generate().await
    }

    /// Cache gate, then collect-and-report. The session store is a
    /// session-level dedup boundary: a stored hash short-circuits before
    /// any collector or network activity, independent of the in-memory
    /// composite. Transport failure degrades to the locally computed
    /// hash; only a server-echoed hash is persisted.
    pub async fn send_to_server(&mut self, endpoint: &str) -> Result<String> {
        if let Some(cached) = self.store.load() {
            log::info!("📂 Session store already holds a hash, skipping collection");
            return Ok(cached);
        }

        let composite = self.generate().await?;
        let local_hash = composite
            .hash()
            .map(str::to_string)
            .ok_or_else(|| FingerprintError::Internal("hash missing after generate".into()))?;
        let body = composite.to_json()?;

        match self.reporter.submit(endpoint, &body).await {
            Ok(Some(server_hash)) => {
                if let Err(err) = self.store.store(&server_hash) {
                    log::warn!("Failed to persist fingerprint hash: {}", err);
                } else {
                    log::info!("💾 Persisted fingerprint hash to session store");
                }
                Ok(server_hash)
            }
            Ok(None) => {
                log::warn!("Endpoint echoed no hash, returning local hash");
                Ok(local_hash)
            }
            Err(err) => {
                log::warn!("Fingerprint report failed ({}), returning local hash", err);
                Ok(local_hash)
            }
        }
    }

    /// Fan out the async collectors, run the synchronous ones inline, and
    /// join everything before the composite exists. Category order in the
    /// result is fixed by the composite type, not by invocation order.
    async fn collect(&self) -> CompositeFingerprint {
        let config = &self.config;

        let (audio, location) = futures::join!(
            async {
                if config.audio {
                    Some(self.source.audio().await)
                } else {
                    None
                }
            },
            async {
                if config.location {
                    Some(self.source.location().await)
                } else {
                    None
                }
            },
        );

        let mut composite = CompositeFingerprint::default();
        composite.browser = config.browser.then(|| self.source.browser());
        composite.screen = config.screen.then(|| self.source.screen());
        composite.timezone = config.timezone.then(|| self.source.timezone());
        composite.canvas = config.canvas.then(|| self.source.canvas());
        composite.webgl = config.webgl.then(|| self.source.webgl());
        composite.audio = audio;
        composite.hardware = config.hardware.then(|| self.source.hardware());
        composite.location = location;
        composite
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::hash::HashStrategy;
    use crate::record::{
        BrowserRecord, GraphicsRecord, HardwareRecord, LocationSignal, Metric, ScreenRecord,
        Signal, TimezoneRecord, CANVAS_NOT_SUPPORTED, WEBGL_NOT_SUPPORTED,
    };
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Signal source with every output pinned, counting invocations.
    struct PinnedSource {
        webgl: Signal<GraphicsRecord>,
        calls: Rc<Cell<usize>>,
    }

    impl PinnedSource {
        fn new() -> Self {
            Self {
                webgl: Signal::Ok(GraphicsRecord {
                    vendor: "TestVendor".into(),
                    renderer: "TestRenderer".into(),
                    version: Some("WebGL 1.0".into()),
                    shading_language_version: None,
                }),
                calls: Rc::new(Cell::new(0)),
            }
        }

        fn without_webgl() -> Self {
            Self {
                webgl: Signal::Unavailable(WEBGL_NOT_SUPPORTED),
                ..Self::new()
            }
        }
    }

    #[async_trait(?Send)]
    impl SignalSource for PinnedSource {
        fn browser(&self) -> BrowserRecord {
            self.calls.set(self.calls.get() + 1);
            BrowserRecord {
                user_agent: "TestAgent/1.0".into(),
                language: "en-US".into(),
                languages: vec!["en-US".into()],
                platform: "TestOS".into(),
                cookie_enabled: true,
                do_not_track: None,
            }
        }

        fn screen(&self) -> ScreenRecord {
            ScreenRecord {
                screen_width: 1920,
                screen_height: 1080,
                avail_width: 1920,
                avail_height: 1040,
                color_depth: 24,
                pixel_depth: 24,
            }
        }

        fn timezone(&self) -> TimezoneRecord {
            TimezoneRecord {
                timezone: "UTC".into(),
                timezone_offset: 0,
            }
        }

        fn canvas(&self) -> Signal<String> {
            Signal::Unavailable(CANVAS_NOT_SUPPORTED)
        }

        fn webgl(&self) -> Signal<GraphicsRecord> {
            self.webgl.clone()
        }

        async fn audio(&self) -> Signal<String> {
            Signal::Ok("124.0431".into())
        }

        fn hardware(&self) -> HardwareRecord {
            HardwareRecord {
                hardware_concurrency: Metric::Count(4),
                device_memory: Metric::UNKNOWN,
                max_touch_points: 0,
            }
        }

        async fn location(&self) -> LocationSignal {
            LocationSignal::unavailable()
        }
    }

    enum SinkReply {
        Echo(&'static str),
        NoHash,
        Fail,
    }

    struct RecordingSink {
        posts: Rc<Cell<usize>>,
        reply: SinkReply,
    }

    impl RecordingSink {
        fn new(reply: SinkReply) -> Self {
            Self {
                posts: Rc::new(Cell::new(0)),
                reply,
            }
        }
    }

    #[async_trait(?Send)]
    impl ReportSink for RecordingSink {
        async fn submit(&self, _endpoint: &str, _body: &str) -> Result<Option<String>> {
            self.posts.set(self.posts.get() + 1);
            match self.reply {
                SinkReply::Echo(hash) => Ok(Some(hash.to_string())),
                SinkReply::NoHash => Ok(None),
                SinkReply::Fail => Err(FingerprintError::Network("endpoint returned 503".into())),
            }
        }
    }

    fn session(
        source: PinnedSource,
        store: MemoryStore,
        sink: RecordingSink,
        config: CollectorConfig,
    ) -> FingerprintSession<PinnedSource, MemoryStore, RecordingSink> {
        FingerprintSession::new(source, store, sink, config)
    }

    fn default_session() -> FingerprintSession<PinnedSource, MemoryStore, RecordingSink> {
        session(
            PinnedSource::new(),
            MemoryStore::new(),
            RecordingSink::new(SinkReply::NoHash),
            CollectorConfig::default(),
        )
    }

    // known-answer vector: audio and location disabled, webgl absent
    const PINNED_JSON: &str = "{\"browser\":{\"userAgent\":\"TestAgent/1.0\",\
\"language\":\"en-US\",\"languages\":[\"en-US\"],\"platform\":\"TestOS\",\
\"cookieEnabled\":true,\"doNotTrack\":null},\
\"screen\":{\"screenWidth\":1920,\"screenHeight\":1080,\"availWidth\":1920,\
\"availHeight\":1040,\"colorDepth\":24,\"pixelDepth\":24},\
\"timezone\":{\"timezone\":\"UTC\",\"timezoneOffset\":0},\
\"canvas\":\"canvas_not_supported\",\
\"webgl\":\"webgl_not_supported\",\
\"hardware\":{\"hardwareConcurrency\":4,\"deviceMemory\":\"unknown\",\"maxTouchPoints\":0}}";

    fn pinned_vector_config() -> CollectorConfig {
        CollectorConfig {
            audio: false,
            location: false,
            hash: HashStrategy::Sha256,
            ..CollectorConfig::default()
        }
    }

    #[test]
    fn determinism_across_fresh_sessions() {
        let a = block_on(default_session().generate()).unwrap();
        let b = block_on(default_session().generate()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.hash(), b.hash());
        assert!(a.hash().is_some());
    }

    #[test]
    fn unavailable_webgl_becomes_sentinel_and_still_hashes() {
        let mut session = session(
            PinnedSource::without_webgl(),
            MemoryStore::new(),
            RecordingSink::new(SinkReply::NoHash),
            CollectorConfig::default(),
        );
        let composite = block_on(session.generate()).unwrap();

        assert!(composite
            .canonical_json()
            .unwrap()
            .contains("\"webgl\":\"webgl_not_supported\""));
        assert_eq!(composite.hash().unwrap().len(), 64);
    }

    #[test]
    fn get_hash_is_idempotent_without_recollection() {
        let source = PinnedSource::new();
        let calls = source.calls.clone();
        let mut session = session(
            source,
            MemoryStore::new(),
            RecordingSink::new(SinkReply::NoHash),
            CollectorConfig::default(),
        );

        let first = block_on(session.get_hash()).unwrap();
        let second = block_on(session.get_hash()).unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.get(), 1, "collectors must not run a second time");
    }

    #[test]
    fn get_data_reuses_existing_composite() {
        let source = PinnedSource::new();
        let calls = source.calls.clone();
        let mut session = session(
            source,
            MemoryStore::new(),
            RecordingSink::new(SinkReply::NoHash),
            CollectorConfig::default(),
        );

        let generated = block_on(session.generate()).unwrap();
        let fetched = block_on(session.get_data()).unwrap();

        assert_eq!(generated, fetched);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn generate_overwrites_prior_composite() {
        let mut session = default_session();
        let first = block_on(session.generate()).unwrap();
        let second = block_on(session.generate()).unwrap();
        assert_eq!(session.fingerprint(), Some(&second));
        assert_eq!(first, second);
    }

    #[test]
    fn send_to_server_short_circuits_on_cached_hash() {
        let source = PinnedSource::new();
        let calls = source.calls.clone();
        let sink = RecordingSink::new(SinkReply::Echo("should-not-be-used"));
        let posts = sink.posts.clone();
        let mut session = session(
            source,
            MemoryStore::preloaded("cached1234"),
            sink,
            CollectorConfig::default(),
        );

        let hash = block_on(session.send_to_server("https://example.test/fp")).unwrap();

        assert_eq!(hash, "cached1234");
        assert_eq!(posts.get(), 0, "no POST on cache hit");
        assert_eq!(calls.get(), 0, "no collector runs on cache hit");
    }

    #[test]
    fn send_to_server_persists_echoed_hash() {
        let sink = RecordingSink::new(SinkReply::Echo("server-echo"));
        let posts = sink.posts.clone();
        let mut session = session(
            PinnedSource::new(),
            MemoryStore::new(),
            sink,
            CollectorConfig::default(),
        );

        let hash = block_on(session.send_to_server("https://example.test/fp")).unwrap();

        assert_eq!(hash, "server-echo");
        assert_eq!(posts.get(), 1);
        assert_eq!(session.store.load(), Some("server-echo".to_string()));
    }

    #[test]
    fn send_to_server_degrades_to_local_hash_on_transport_failure() {
        let mut session = session(
            PinnedSource::new(),
            MemoryStore::new(),
            RecordingSink::new(SinkReply::Fail),
            CollectorConfig::default(),
        );

        let hash = block_on(session.send_to_server("https://example.test/fp")).unwrap();
        let local = session.fingerprint().unwrap().hash().unwrap();

        assert_eq!(hash, local);
        assert_eq!(session.store.load(), None, "failed report must not persist");
    }

    #[test]
    fn send_to_server_without_echo_returns_local_hash_unpersisted() {
        let mut session = default_session();
        let hash = block_on(session.send_to_server("https://example.test/fp")).unwrap();

        assert_eq!(hash, session.fingerprint().unwrap().hash().unwrap());
        assert_eq!(session.store.load(), None);
    }

    #[test]
    fn pinned_end_to_end_sha256_vector() {
        let mut session = session(
            PinnedSource::without_webgl(),
            MemoryStore::new(),
            RecordingSink::new(SinkReply::NoHash),
            pinned_vector_config(),
        );
        let composite = block_on(session.generate()).unwrap();

        assert_eq!(composite.canonical_json().unwrap(), PINNED_JSON);
        assert_eq!(
            composite.hash().unwrap(),
            hash::digest(HashStrategy::Sha256, PINNED_JSON)
        );
    }

    #[test]
    fn rolling_strategy_end_to_end() {
        let config = CollectorConfig {
            hash: HashStrategy::Rolling,
            ..pinned_vector_config()
        };
        let mut session = session(
            PinnedSource::without_webgl(),
            MemoryStore::new(),
            RecordingSink::new(SinkReply::NoHash),
            config,
        );
        let composite = block_on(session.generate()).unwrap();

        assert_eq!(
            composite.hash().unwrap(),
            hash::digest(HashStrategy::Rolling, PINNED_JSON)
        );
    }

    #[test]
    fn disabled_categories_never_reach_the_composite() {
        let config = CollectorConfig {
            browser: false,
            location: false,
            ..CollectorConfig::default()
        };
        let mut session = session(
            PinnedSource::new(),
            MemoryStore::new(),
            RecordingSink::new(SinkReply::NoHash),
            config,
        );
        let composite = block_on(session.generate()).unwrap();

        assert!(composite.browser.is_none());
        assert!(composite.location.is_none());
        assert!(composite.audio.is_some());
    }
}
