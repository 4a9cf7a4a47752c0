//! 追踪初始化、轮询周期 ID 与进程内计数。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 轮询计数快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollMetricsSnapshot {
    pub cycles_started: u64,
    pub cycles_completed: u64,
    pub cycles_aborted: u64,
    pub cycles_skipped: u64,
    pub assets_created: u64,
    pub data_pushed: u64,
    pub activation_writes: u64,
}

/// 轮询计数（MVP）。
#[derive(Default)]
pub struct PollMetrics {
    cycles_started: AtomicU64,
    cycles_completed: AtomicU64,
    cycles_aborted: AtomicU64,
    cycles_skipped: AtomicU64,
    assets_created: AtomicU64,
    data_pushed: AtomicU64,
    activation_writes: AtomicU64,
}

impl PollMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> PollMetricsSnapshot {
        PollMetricsSnapshot {
            cycles_started: self.cycles_started.load(Ordering::Relaxed),
            cycles_completed: self.cycles_completed.load(Ordering::Relaxed),
            cycles_aborted: self.cycles_aborted.load(Ordering::Relaxed),
            cycles_skipped: self.cycles_skipped.load(Ordering::Relaxed),
            assets_created: self.assets_created.load(Ordering::Relaxed),
            data_pushed: self.data_pushed.load(Ordering::Relaxed),
            activation_writes: self.activation_writes.load(Ordering::Relaxed),
        }
    }

    pub fn cycle_started(&self) {
        self.cycles_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cycle_completed(&self) {
        self.cycles_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cycle_aborted(&self) {
        self.cycles_aborted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cycle_skipped(&self) {
        self.cycles_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn asset_created(&self) {
        self.assets_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn data_pushed(&self) {
        self.data_pushed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn activation_write(&self) {
        self.activation_writes.fetch_add(1, Ordering::Relaxed);
    }
}

static METRICS: OnceLock<PollMetrics> = OnceLock::new();

/// 获取全局计数实例（MVP）。
pub fn metrics() -> &'static PollMetrics {
    METRICS.get_or_init(PollMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的轮询周期 ID。
pub fn new_cycle_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 记录轮询周期开始。
pub fn record_cycle_started() {
    metrics().cycle_started();
}

/// 记录轮询周期正常结束。
pub fn record_cycle_completed() {
    metrics().cycle_completed();
}

/// 记录轮询周期中止。
pub fn record_cycle_aborted() {
    metrics().cycle_aborted();
}

/// 记录因同配置周期仍在执行而丢弃的调用。
pub fn record_cycle_skipped() {
    metrics().cycle_skipped();
}

/// 记录新建资产次数。
pub fn record_asset_created() {
    metrics().asset_created();
}

/// 记录数据写入平台次数。
pub fn record_data_pushed() {
    metrics().data_pushed();
}

/// 记录激活状态写入次数。
pub fn record_activation_write() {
    metrics().activation_write();
}
