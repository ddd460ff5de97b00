//! Dashboard Sync Manager
//!
//! Owns the query and view state of the dashboard and runs the fetch
//! state machine (Idle → Fetching → Settled | Failed):
//! - Mount, every query change and every poll tick issue one cycle
//! - A cycle fetches the token page and the stats concurrently and joins on both
//! - Each cycle carries a sequence number; only the latest issued one may settle
//! - Data is replaced only when both requests succeed, a failed cycle keeps
//!   the last-known-good view
//!
//! The manager is a single task. Intents arrive over an mpsc channel and
//! snapshots leave over a watch channel, so nothing else mutates state.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::core::query_state::{DashboardIntent, IntentEffect, QueryState};
use crate::core::view_state::{CyclePhase, DashboardSnapshot, ViewState};
use crate::models::config::DashboardConfig;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{StatsSummary, Token, TokenPageRequest};
use crate::providers::scanner_api::ScannerSource;

/// What caused a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleTrigger {
    Mount,
    Timer,
    Intent(DashboardIntent),
}

impl fmt::Display for CycleTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleTrigger::Mount => f.write_str("mount"),
            CycleTrigger::Timer => f.write_str("timer"),
            CycleTrigger::Intent(intent) => write!(f, "{:?}", intent),
        }
    }
}

/// Both results of one cycle, delivered together
struct CycleOutcome {
    seq: u64,
    request: TokenPageRequest,
    tokens: AppResult<Vec<Token>>,
    stats: AppResult<StatsSummary>,
}

#[derive(Default)]
struct SyncCounters {
    issued: AtomicU64,
    settled: AtomicU64,
    failed: AtomicU64,
    discarded: AtomicU64,
}

/// Cycle counters for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncStats {
    pub cycles_issued: u64,
    pub cycles_settled: u64,
    pub cycles_failed: u64,
    /// Settlements dropped because a newer cycle had been issued
    pub stale_discarded: u64,
}

/// Builder that mounts a dashboard on a data source
pub struct DashboardSync {
    source: Arc<dyn ScannerSource>,
    config: DashboardConfig,
}

impl DashboardSync {
    pub fn new(source: Arc<dyn ScannerSource>, config: DashboardConfig) -> Self {
        Self { source, config }
    }

    /// Start the manager task and issue the mount cycle.
    /// Must be called from within a tokio runtime.
    pub fn mount(self) -> AppResult<DashboardHandle> {
        self.config.validate()?;

        let query = QueryState::from_config(&self.config);
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(DashboardSnapshot::initial(query));
        let counters = Arc::new(SyncCounters::default());

        let mut manager = SyncManager {
            source: self.source,
            poll_interval: self.config.poll_interval,
            reset_page_on_filter_change: self.config.reset_page_on_filter_change,
            query,
            view: ViewState::default(),
            phase: CyclePhase::Idle,
            latest_cycle: 0,
            displayed_cycle: None,
            in_flight: JoinSet::new(),
            intents: intent_rx,
            snapshots: snapshot_tx,
            counters: Arc::clone(&counters),
        };

        info!(
            "📺 Dashboard mounted (poll every {}s, page size {})",
            self.config.poll_interval.as_secs(),
            self.config.page_size
        );
        manager.issue_cycle(CycleTrigger::Mount);
        let task = tokio::spawn(manager.run());

        Ok(DashboardHandle {
            intents: intent_tx,
            snapshots: snapshot_rx,
            counters,
            task: Some(task),
        })
    }
}

/// Handle of a mounted dashboard. Dropping it tears the dashboard down.
pub struct DashboardHandle {
    intents: mpsc::UnboundedSender<DashboardIntent>,
    snapshots: watch::Receiver<DashboardSnapshot>,
    counters: Arc<SyncCounters>,
    task: Option<JoinHandle<()>>,
}

impl DashboardHandle {
    /// Forward a user intent to the manager
    pub fn dispatch(&self, intent: DashboardIntent) -> AppResult<()> {
        self.intents.send(intent).map_err(|_| AppError::dashboard_closed())
    }

    /// Receiver notified on every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.snapshots.clone()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn stats(&self) -> SyncStats {
        SyncStats {
            cycles_issued: self.counters.issued.load(Ordering::Relaxed),
            cycles_settled: self.counters.settled.load(Ordering::Relaxed),
            cycles_failed: self.counters.failed.load(Ordering::Relaxed),
            stale_discarded: self.counters.discarded.load(Ordering::Relaxed),
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop the poll timer and abort in-flight cycles
    pub async fn shutdown(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
        info!("🛑 Dashboard detached");
    }
}

impl Drop for DashboardHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

struct SyncManager {
    source: Arc<dyn ScannerSource>,
    poll_interval: Duration,
    reset_page_on_filter_change: bool,
    query: QueryState,
    view: ViewState,
    phase: CyclePhase,
    latest_cycle: u64,
    displayed_cycle: Option<u64>,
    in_flight: JoinSet<CycleOutcome>,
    intents: mpsc::UnboundedReceiver<DashboardIntent>,
    snapshots: watch::Sender<DashboardSnapshot>,
    counters: Arc<SyncCounters>,
}

impl SyncManager {
    async fn run(mut self) {
        // First tick one full period after mount; mount already fetched
        let mut ticker = interval_at(Instant::now() + self.poll_interval, self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.issue_cycle(CycleTrigger::Timer),
                intent = self.intents.recv() => match intent {
                    Some(intent) => self.handle_intent(intent),
                    None => {
                        debug!("Intent channel closed, stopping dashboard");
                        break;
                    }
                },
                Some(joined) = self.in_flight.join_next() => match joined {
                    Ok(outcome) => self.settle(outcome),
                    Err(e) => warn!("⚠️ Cycle task ended abnormally: {}", e),
                },
            }
        }
    }

    fn handle_intent(&mut self, intent: DashboardIntent) {
        let effect = self.query.apply(
            intent,
            self.view.tokens.len(),
            self.reset_page_on_filter_change,
        );
        match effect {
            IntentEffect::Refetch => self.issue_cycle(CycleTrigger::Intent(intent)),
            IntentEffect::Ignored(reason) => debug!("⏭️ Ignoring {:?}: {}", intent, reason),
        }
    }

    fn issue_cycle(&mut self, trigger: CycleTrigger) {
        self.latest_cycle += 1;
        let seq = self.latest_cycle;
        let request = self.query.request();

        self.phase = CyclePhase::Fetching;
        self.view.loading = true;
        self.counters.issued.fetch_add(1, Ordering::Relaxed);

        info!(
            "🔄 Cycle #{} ({}): page {}, network {}",
            seq,
            trigger,
            request.page,
            request.network.map(|n| n.as_code()).unwrap_or("all")
        );

        let source = Arc::clone(&self.source);
        self.in_flight.spawn(async move {
            let (tokens, stats) =
                tokio::join!(source.fetch_tokens(&request), source.fetch_stats());
            CycleOutcome { seq, request, tokens, stats }
        });

        self.publish();
    }

    fn settle(&mut self, outcome: CycleOutcome) {
        let seq = outcome.seq;
        if seq != self.latest_cycle {
            self.counters.discarded.fetch_add(1, Ordering::Relaxed);
            debug!(
                "🗑️ Discarding stale cycle #{} (page {}), latest is #{}",
                seq, outcome.request.page, self.latest_cycle
            );
            return;
        }

        self.view.loading = false;
        match (outcome.tokens, outcome.stats) {
            (Ok(tokens), Ok(stats)) => {
                info!(
                    "✅ Cycle #{} settled: {} tokens on page {}, {} tracked in total",
                    seq,
                    tokens.len(),
                    outcome.request.page,
                    stats.total_tokens
                );
                self.view.tokens = tokens;
                self.view.stats = Some(stats);
                self.displayed_cycle = Some(seq);
                self.phase = CyclePhase::Settled;
                self.counters.settled.fetch_add(1, Ordering::Relaxed);
            }
            (tokens, stats) => {
                if let Err(e) = &tokens {
                    warn!("⚠️ Cycle #{} token list failed: {}", seq, e);
                }
                if let Err(e) = &stats {
                    warn!("⚠️ Cycle #{} stats failed: {}", seq, e);
                }
                self.phase = CyclePhase::Failed;
                self.counters.failed.fetch_add(1, Ordering::Relaxed);
            }
        }

        self.publish();
    }

    fn publish(&self) {
        self.snapshots.send_replace(DashboardSnapshot {
            query: self.query,
            view: self.view.clone(),
            phase: self.phase,
            latest_cycle: self.latest_cycle,
            displayed_cycle: self.displayed_cycle,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query_state::NetworkFilter;
    use crate::models::types::{HourlyCount, Network};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::collections::{BTreeMap, HashMap, HashSet};
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    /// Scripted backend: delays per page / per stats call, optional failures
    #[derive(Default)]
    struct MockSource {
        token_delays: HashMap<u32, Duration>,
        token_counts: HashMap<u32, usize>,
        stats_delays: HashMap<usize, Duration>,
        failing_stats_calls: HashSet<usize>,
        fixed_stats: bool,
        requests: Mutex<Vec<TokenPageRequest>>,
        stats_calls: AtomicUsize,
    }

    impl MockSource {
        fn requests(&self) -> Vec<TokenPageRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    fn mock_token(id: u64, network: Network) -> Token {
        Token {
            id,
            name: Some(format!("Token {}", id)),
            symbol: Some(format!("T{}", id)),
            decimals: Some(18),
            address: format!("0x{:040x}", id),
            network,
            block_number: 19_000_000 + id,
            total_supply: Some("1000000000000000000000".to_string()),
            risk_score: Some((id % 11) as u8),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            confirmed: true,
            creator_address: None,
            tx_hash: None,
            is_verified: false,
        }
    }

    #[async_trait]
    impl ScannerSource for MockSource {
        async fn fetch_tokens(&self, request: &TokenPageRequest) -> AppResult<Vec<Token>> {
            self.requests.lock().unwrap().push(*request);
            if let Some(delay) = self.token_delays.get(&request.page) {
                tokio::time::sleep(*delay).await;
            }
            let count = self.token_counts.get(&request.page).copied().unwrap_or(20);
            let network = request.network.unwrap_or(Network::Bsc);
            Ok((0..count as u64)
                .map(|i| mock_token(request.page as u64 * 1000 + i, network))
                .collect())
        }

        async fn fetch_stats(&self) -> AppResult<StatsSummary> {
            let call = self.stats_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.stats_delays.get(&call) {
                tokio::time::sleep(*delay).await;
            }
            if self.failing_stats_calls.contains(&call) {
                return Err(AppError::http_status(500, "stats unavailable"));
            }
            let total = if self.fixed_stats { 1000 } else { 1000 + call as u64 };
            Ok(StatsSummary {
                total_tokens: total,
                tokens_last_24h: 48,
                tokens_last_hour: 2,
                by_network: BTreeMap::from([("BSC".to_string(), 400), ("ETH".to_string(), 600)]),
                hourly_distribution: vec![HourlyCount {
                    hour: "2024-05-01 11:00".to_string(),
                    count: 2,
                }],
            })
        }
    }

    fn mount(source: &Arc<MockSource>) -> DashboardHandle {
        mount_with(source, DashboardConfig::default())
    }

    fn mount_with(source: &Arc<MockSource>, config: DashboardConfig) -> DashboardHandle {
        let source: Arc<dyn ScannerSource> = source.clone();
        DashboardSync::new(source, config).mount().expect("mount")
    }

    async fn wait_until(
        handle: &DashboardHandle,
        mut done: impl FnMut(&DashboardSnapshot) -> bool,
    ) -> DashboardSnapshot {
        let mut rx = handle.subscribe();
        let snapshot = rx.wait_for(|s| done(s)).await.expect("manager stopped");
        snapshot.clone()
    }

    fn settled(cycle: u64) -> impl FnMut(&DashboardSnapshot) -> bool {
        move |s| s.latest_cycle == cycle && s.is_quiet()
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_load_fetches_first_page_and_stats() {
        let source = Arc::new(MockSource::default());
        let handle = mount(&source);

        let first = handle.snapshot();
        assert_eq!(first.phase, CyclePhase::Fetching);
        assert!(first.view.loading);
        assert!(first.view.stats.is_none());

        let snapshot = wait_until(&handle, settled(1)).await;
        assert_eq!(snapshot.phase, CyclePhase::Settled);
        assert!(!snapshot.view.loading);
        assert!(snapshot.view.tokens.len() <= 20);
        assert!(snapshot.view.stats.is_some());
        assert_eq!(snapshot.displayed_cycle, Some(1));

        assert_eq!(
            source.requests(),
            vec![TokenPageRequest { page: 1, page_size: 20, network: None, confirmed_only: true }]
        );
        assert_eq!(source.stats_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_cycle_never_overwrites_newer_one() {
        let source = Arc::new(MockSource {
            token_delays: HashMap::from([(1, Duration::from_secs(5))]),
            stats_delays: HashMap::from([(0, Duration::from_secs(5))]),
            ..Default::default()
        });
        let handle = mount(&source);
        handle.dispatch(DashboardIntent::GoToPage(2)).unwrap();

        let snapshot = wait_until(&handle, |s| s.displayed_cycle == Some(2)).await;
        assert!(snapshot.view.tokens.iter().all(|t| t.id / 1000 == 2));

        // let cycle #1 resolve late
        tokio::time::sleep(Duration::from_secs(10)).await;

        let after = handle.snapshot();
        assert_eq!(after.displayed_cycle, Some(2));
        assert_eq!(after.view, snapshot.view);
        assert_eq!(after.phase, CyclePhase::Settled);
        assert!(!after.view.loading);
        assert_eq!(handle.stats().stale_discarded, 1);
        assert_eq!(handle.stats().cycles_settled, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_failure_keeps_previous_view() {
        let source = Arc::new(MockSource {
            failing_stats_calls: HashSet::from([1]),
            ..Default::default()
        });
        let handle = mount(&source);
        let before = wait_until(&handle, settled(1)).await;

        handle
            .dispatch(DashboardIntent::SelectNetwork(NetworkFilter::Only(Network::Eth)))
            .unwrap();
        let after = wait_until(&handle, settled(2)).await;

        assert_eq!(after.phase, CyclePhase::Failed);
        assert_eq!(after.view.tokens, before.view.tokens);
        assert_eq!(after.view.stats, before.view.stats);
        assert!(!after.view.loading);
        assert_eq!(after.displayed_cycle, Some(1));
        assert_eq!(after.query.network(), NetworkFilter::Only(Network::Eth));
        assert_eq!(handle.stats().cycles_failed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_cycle_recovers_on_next_trigger() {
        let source = Arc::new(MockSource {
            failing_stats_calls: HashSet::from([0]),
            ..Default::default()
        });
        let handle = mount(&source);

        let failed = wait_until(&handle, settled(1)).await;
        assert_eq!(failed.phase, CyclePhase::Failed);
        assert!(failed.view.tokens.is_empty());
        assert!(failed.view.stats.is_none());

        handle.dispatch(DashboardIntent::Refresh).unwrap();
        let recovered = wait_until(&handle, settled(2)).await;
        assert_eq!(recovered.phase, CyclePhase::Settled);
        assert_eq!(recovered.view.tokens.len(), 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_identical_cycles_yield_identical_view() {
        let source = Arc::new(MockSource { fixed_stats: true, ..Default::default() });
        let handle = mount(&source);
        let first = wait_until(&handle, settled(1)).await;

        handle.dispatch(DashboardIntent::Refresh).unwrap();
        let second = wait_until(&handle, settled(2)).await;

        assert_eq!(second.displayed_cycle, Some(2));
        assert_eq!(first.view, second.view);
    }

    #[tokio::test(start_paused = true)]
    async fn test_filter_change_keeps_current_page() {
        let source = Arc::new(MockSource::default());
        let handle = mount(&source);
        wait_until(&handle, settled(1)).await;

        handle.dispatch(DashboardIntent::GoToPage(3)).unwrap();
        handle
            .dispatch(DashboardIntent::SelectNetwork(NetworkFilter::Only(Network::Eth)))
            .unwrap();
        let snapshot = wait_until(&handle, settled(3)).await;

        let requests = source.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(
            requests[2],
            TokenPageRequest {
                page: 3,
                page_size: 20,
                network: Some(Network::Eth),
                confirmed_only: true
            }
        );
        assert!(snapshot.view.tokens.iter().all(|t| t.network == Network::Eth));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ignored_intents_issue_no_cycle() {
        let source = Arc::new(MockSource {
            token_counts: HashMap::from([(1, 5)]),
            ..Default::default()
        });
        let handle = mount(&source);
        let snapshot = wait_until(&handle, settled(1)).await;
        assert!(!snapshot.pagination().has_next);
        assert!(!snapshot.pagination().has_previous);

        handle.dispatch(DashboardIntent::NextPage).unwrap();
        handle.dispatch(DashboardIntent::PreviousPage).unwrap();
        handle.dispatch(DashboardIntent::GoToPage(0)).unwrap();
        handle.dispatch(DashboardIntent::SelectNetwork(NetworkFilter::All)).unwrap();
        handle.dispatch(DashboardIntent::Refresh).unwrap();

        wait_until(&handle, settled(2)).await;
        assert_eq!(source.requests().len(), 2);
        assert_eq!(handle.stats().cycles_issued, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_keeps_cadence_despite_manual_triggers() {
        let source = Arc::new(MockSource::default());
        let handle = mount(&source);
        wait_until(&handle, settled(1)).await;

        tokio::time::sleep(Duration::from_secs(10)).await;
        handle.dispatch(DashboardIntent::Refresh).unwrap();
        wait_until(&handle, settled(2)).await;

        // ticks at 30s and 60s after mount, unaffected by the refresh at 10s
        tokio::time::sleep(Duration::from_secs(55)).await;
        wait_until(&handle, settled(4)).await;
        assert_eq!(source.requests().len(), 4);
        assert_eq!(source.stats_calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_timer_and_remount_starts_fresh() {
        let source = Arc::new(MockSource::default());
        let handle = mount(&source);
        wait_until(&handle, settled(1)).await;
        assert!(handle.is_running());

        let mut rx = handle.subscribe();
        let _ = rx.borrow_and_update();
        handle.shutdown().await;
        assert!(rx.changed().await.is_err());

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(source.requests().len(), 1);

        let remounted = mount(&source);
        wait_until(&remounted, settled(1)).await;
        tokio::time::sleep(Duration::from_secs(31)).await;
        wait_until(&remounted, settled(2)).await;
        assert_eq!(source.requests().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_filter_change_resets_page_when_configured() {
        let source = Arc::new(MockSource::default());
        let config = DashboardConfig::default().with_reset_page_on_filter_change(true);
        let handle = mount_with(&source, config);
        wait_until(&handle, settled(1)).await;

        handle.dispatch(DashboardIntent::GoToPage(3)).unwrap();
        wait_until(&handle, settled(2)).await;
        handle
            .dispatch(DashboardIntent::SelectNetwork(NetworkFilter::Only(Network::Bsc)))
            .unwrap();
        let snapshot = wait_until(&handle, settled(3)).await;

        let requests = source.requests();
        assert_eq!(requests[1].page, 3);
        assert_eq!(
            requests[2],
            TokenPageRequest {
                page: 1,
                page_size: 20,
                network: Some(Network::Bsc),
                confirmed_only: true
            }
        );
        assert_eq!(snapshot.query.page(), 1);
        assert!(!snapshot.pagination().has_previous);
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_past_highest_page_keeps_manager_alive() {
        let source = Arc::new(MockSource::default());
        let handle = mount(&source);
        wait_until(&handle, settled(1)).await;

        handle.dispatch(DashboardIntent::GoToPage(u32::MAX)).unwrap();
        let snapshot = wait_until(&handle, settled(2)).await;
        assert!(snapshot.pagination().has_next);

        handle.dispatch(DashboardIntent::NextPage).unwrap();
        handle.dispatch(DashboardIntent::Refresh).unwrap();
        let snapshot = wait_until(&handle, settled(3)).await;

        assert!(handle.is_running());
        assert_eq!(snapshot.phase, CyclePhase::Settled);
        assert_eq!(snapshot.query.page(), u32::MAX);
        assert_eq!(source.requests().last().map(|r| r.page), Some(u32::MAX));
        assert_eq!(handle.stats().cycles_failed, 0);
    }
}
