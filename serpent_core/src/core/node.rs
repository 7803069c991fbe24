use crate::error::{SerpentError, SerpentResult};
use crate::params::RuntimeParams;
use std::fmt;
use std::time::Instant;

const HISTORY_LIMIT: usize = 100;

/// Trait for providing lightweight logging summaries of message types
///
/// Frame snapshots can carry hundreds of segments; implementations should
/// only include what is useful in a single log line.
pub trait LogSummary {
    /// Return a compact string representation suitable for logging
    fn log_summary(&self) -> String;
}

/// Node states for monitoring and lifecycle management
#[derive(Debug, Clone, PartialEq)]
pub enum NodeState {
    Uninitialized,
    Initializing,
    Running,
    Stopping,
    Stopped,
    Error(String),
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeState::Uninitialized => write!(f, "Uninitialized"),
            NodeState::Initializing => write!(f, "Initializing"),
            NodeState::Running => write!(f, "Running"),
            NodeState::Stopping => write!(f, "Stopping"),
            NodeState::Stopped => write!(f, "Stopped"),
            NodeState::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

/// Performance metrics for node execution
#[derive(Debug, Clone, Default)]
pub struct NodeMetrics {
    pub total_ticks: u64,
    pub avg_tick_duration_us: f64,
    pub max_tick_duration_us: f64,
    pub last_tick_duration_us: f64,
    pub messages_sent: u64,
    pub messages_received: u64,
    pub errors_count: u64,
    pub warnings_count: u64,
}

/// Configuration parameters for node behavior
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub enable_logging: bool,
    /// One of "QUIET", "INFO" or "DEBUG"
    pub log_level: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            enable_logging: true,
            log_level: "INFO".to_string(),
        }
    }
}

/// Context and bookkeeping for a single registered node
pub struct NodeInfo {
    name: String,
    instance_id: String,

    state: NodeState,

    config: NodeConfig,
    metrics: NodeMetrics,

    tick_start_time: Option<Instant>,

    error_history: Vec<(Instant, String)>,
    warning_history: Vec<(Instant, String)>,

    // Runtime parameters
    pub params: RuntimeParams,
}

impl NodeInfo {
    pub fn new(node_name: String, logging_enabled: bool) -> Self {
        let config = NodeConfig {
            enable_logging: logging_enabled,
            ..Default::default()
        };
        Self::new_with_config(node_name, config)
    }

    pub fn new_with_config(node_name: String, config: NodeConfig) -> Self {
        Self {
            name: node_name,
            instance_id: uuid::Uuid::new_v4().to_string(),
            state: NodeState::Uninitialized,
            config,
            metrics: NodeMetrics::default(),
            tick_start_time: None,
            error_history: Vec::new(),
            warning_history: Vec::new(),
            params: RuntimeParams::empty(),
        }
    }

    /// Attach a shared parameter store (builder style)
    pub fn with_params(mut self, params: RuntimeParams) -> Self {
        self.params = params;
        self
    }

    // State Management Methods
    pub fn state(&self) -> &NodeState {
        &self.state
    }

    pub fn set_state(&mut self, new_state: NodeState) {
        if self.state != new_state {
            tracing::trace!(node = %self.name, from = %self.state, to = %new_state, "state change");
            self.state = new_state;
        }
    }

    pub fn transition_to_error(&mut self, error_msg: String) {
        self.log_error(&error_msg);
        self.set_state(NodeState::Error(error_msg));
    }

    pub fn initialize(&mut self) -> SerpentResult<()> {
        if matches!(self.state, NodeState::Error(_)) {
            return Err(SerpentError::Internal(format!(
                "node '{}' cannot be initialized from an error state",
                self.name
            )));
        }
        self.set_state(NodeState::Initializing);
        self.set_state(NodeState::Running);
        Ok(())
    }

    pub fn shutdown(&mut self) -> SerpentResult<()> {
        self.set_state(NodeState::Stopping);
        self.set_state(NodeState::Stopped);
        Ok(())
    }

    // Tick Management
    pub fn start_tick(&mut self) {
        self.tick_start_time = Some(Instant::now());
    }

    pub fn record_tick(&mut self) {
        let Some(start_time) = self.tick_start_time.take() else {
            return;
        };
        let duration_us = start_time.elapsed().as_secs_f64() * 1_000_000.0;

        self.metrics.total_ticks += 1;
        self.metrics.last_tick_duration_us = duration_us;
        if duration_us > self.metrics.max_tick_duration_us {
            self.metrics.max_tick_duration_us = duration_us;
        }

        // Running mean
        let n = self.metrics.total_ticks as f64;
        self.metrics.avg_tick_duration_us += (duration_us - self.metrics.avg_tick_duration_us) / n;
    }

    /// Record an outbound message; `summary` is computed before the message is moved
    pub fn log_pub_summary(&mut self, topic: &str, summary: &str) {
        if self.debug_enabled() {
            tracing::debug!(node = %self.name, topic, "--PUB--> {}", summary);
        }
        self.metrics.messages_sent += 1;
    }

    pub fn log_sub_summary(&mut self, topic: &str, summary: &str) {
        if self.debug_enabled() {
            tracing::debug!(node = %self.name, topic, "<--SUB-- {}", summary);
        }
        self.metrics.messages_received += 1;
    }

    pub fn log_info(&self, message: &str) {
        if self.config.enable_logging
            && (self.config.log_level == "INFO" || self.config.log_level == "DEBUG")
        {
            tracing::info!(node = %self.name, "{}", message);
        }
    }

    pub fn log_warning(&mut self, message: &str) {
        if self.config.enable_logging {
            tracing::warn!(node = %self.name, "{}", message);
        }

        push_bounded(&mut self.warning_history, message);
        self.metrics.warnings_count += 1;
    }

    pub fn log_error(&mut self, message: &str) {
        if self.config.enable_logging {
            tracing::error!(node = %self.name, "{}", message);
        }

        push_bounded(&mut self.error_history, message);
        self.metrics.errors_count += 1;
    }

    pub fn log_debug(&self, message: &str) {
        if self.debug_enabled() {
            tracing::debug!(node = %self.name, "{}", message);
        }
    }

    fn debug_enabled(&self) -> bool {
        self.config.enable_logging && self.config.log_level == "DEBUG"
    }

    // Getters
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }
    pub fn metrics(&self) -> &NodeMetrics {
        &self.metrics
    }
    pub fn recent_errors(&self) -> impl Iterator<Item = &str> {
        self.error_history.iter().map(|(_, msg)| msg.as_str())
    }
    pub fn recent_warnings(&self) -> impl Iterator<Item = &str> {
        self.warning_history.iter().map(|(_, msg)| msg.as_str())
    }
}

fn push_bounded(history: &mut Vec<(Instant, String)>, message: &str) {
    history.push((Instant::now(), message.to_string()));
    if history.len() > HISTORY_LIMIT {
        history.remove(0);
    }
}

/// A unit of work driven by the [`Scheduler`](crate::scheduling::Scheduler)
pub trait Node: Send {
    /// Get the node's name (must be unique within a scheduler)
    fn name(&self) -> &'static str;

    /// Initialize the node (called once before the first tick)
    fn init(&mut self, ctx: &mut NodeInfo) -> SerpentResult<()> {
        ctx.log_info("Node initialized successfully");
        Ok(())
    }

    /// Per-frame work
    fn tick(&mut self, ctx: Option<&mut NodeInfo>);

    /// Shutdown the node (called once when the loop stops)
    fn shutdown(&mut self, ctx: &mut NodeInfo) -> SerpentResult<()> {
        ctx.log_info("Node shutdown successfully");
        Ok(())
    }
}

// LogSummary implementations for primitive types
impl LogSummary for f64 {
    fn log_summary(&self) -> String {
        format!("{:.3}", self)
    }
}

impl LogSummary for u32 {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for u64 {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for bool {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for String {
    fn log_summary(&self) -> String {
        self.clone()
    }
}
