use super::config::SchedulerConfig;
use crate::core::{Node, NodeInfo, NodeState};
use crate::error::{SerpentError, SerpentResult};
use crate::params::RuntimeParams;
use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;

/// Node registration info with lifecycle tracking
struct RegisteredNode {
    node: Box<dyn Node>,
    priority: u32,
    initialized: bool,
    context: NodeInfo,
}

/// Cloneable stop signal for a running [`Scheduler`]
///
/// Input handlers, other threads and signal handlers hold one of these; the
/// loop observes it between ticks.
#[derive(Debug, Clone)]
pub struct StopHandle {
    running: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        !self.running.load(Ordering::SeqCst)
    }
}

/// Central orchestrator: holds nodes, drives the tick loop.
pub struct Scheduler {
    nodes: Vec<RegisteredNode>,
    running: Arc<AtomicBool>,
    config: SchedulerConfig,
    params: RuntimeParams,
    total_ticks: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Create an empty scheduler with the standard configuration
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            running: Arc::new(AtomicBool::new(true)),
            config: SchedulerConfig::standard(),
            params: RuntimeParams::empty(),
            total_ticks: 0,
        }
    }

    /// Apply a configuration (builder pattern)
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Share a parameter store with every node registered afterwards
    pub fn with_params(mut self, params: RuntimeParams) -> Self {
        self.params = params;
        self
    }

    /// Set scheduler name (for logging)
    pub fn with_name(mut self, name: &str) -> Self {
        self.config.name = name.to_string();
        self
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Register a node
    ///
    /// Lower priority values tick first; nodes with equal priority tick in
    /// registration order.
    ///
    /// # Example
    /// ```ignore
    /// scheduler.add(Box::new(input), 0, Some(false))
    ///     .add(Box::new(sim), 10, Some(true));
    /// ```
    pub fn add(
        &mut self,
        node: Box<dyn Node>,
        priority: u32,
        logging_enabled: Option<bool>,
    ) -> &mut Self {
        let node_name = node.name().to_string();
        let logging_enabled = logging_enabled.unwrap_or(false);
        let context =
            NodeInfo::new(node_name.clone(), logging_enabled).with_params(self.params.clone());

        let index = self.nodes.partition_point(|registered| registered.priority <= priority);
        self.nodes.insert(
            index,
            RegisteredNode {
                node,
                priority,
                initialized: false,
                context,
            },
        );

        tracing::debug!(
            scheduler = %self.config.name,
            "Added node '{}' with priority {} (logging: {})",
            node_name,
            priority,
            logging_enabled
        );

        self
    }

    /// Check if the scheduler is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the scheduler; the loop exits after the current tick
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            running: self.running.clone(),
        }
    }

    /// Names of registered nodes in tick order
    pub fn get_node_list(&self) -> Vec<String> {
        self.nodes
            .iter()
            .map(|registered| registered.node.name().to_string())
            .collect()
    }

    pub fn node_state(&self, name: &str) -> Option<&NodeState> {
        self.nodes
            .iter()
            .find(|registered| registered.node.name() == name)
            .map(|registered| registered.context.state())
    }

    /// Frames executed since construction
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Run `init()` on every node that has not been initialized yet
    pub fn init_nodes(&mut self) {
        for registered in self.nodes.iter_mut().filter(|r| !r.initialized) {
            let node_name = registered.node.name();
            let ctx = &mut registered.context;
            let result = match ctx.initialize() {
                Ok(()) => registered.node.init(ctx),
                Err(e) => Err(e),
            };

            match result {
                Ok(()) => {
                    registered.initialized = true;
                    tracing::debug!("Initialized node '{}'", node_name);
                }
                Err(e) => {
                    // Not retried; the node is skipped from now on
                    registered.initialized = true;
                    ctx.transition_to_error(format!("Initialization failed: {}", e));
                }
            }
        }
    }

    /// Execute exactly one frame: every healthy node ticks once, in priority order
    pub fn tick_once(&mut self) {
        self.init_nodes();

        for registered in self.nodes.iter_mut() {
            if registered.context.state() != &NodeState::Running {
                continue;
            }
            let ctx = &mut registered.context;
            ctx.start_tick();
            registered.node.tick(Some(ctx));
            ctx.record_tick();
        }

        self.total_ticks += 1;
    }

    /// Call `shutdown()` on every initialized node
    pub fn shutdown_nodes(&mut self) {
        for registered in self.nodes.iter_mut() {
            if !registered.initialized || registered.context.state() != &NodeState::Running {
                continue;
            }
            let node_name = registered.node.name();
            let ctx = &mut registered.context;
            let result = match registered.node.shutdown(ctx) {
                Ok(()) => ctx.shutdown(),
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => tracing::debug!("Shutdown node '{}' successfully", node_name),
                Err(e) => ctx.log_error(&format!("Error shutting down: {}", e)),
            }
        }
    }

    /// Main loop: runs until [`stop`](Self::stop) or Ctrl+C
    pub fn run(&mut self) -> SerpentResult<()> {
        self.run_with_limits(None, None)
    }

    /// Run for a wall-clock duration, then shutdown gracefully
    pub fn run_for(&mut self, duration: Duration) -> SerpentResult<()> {
        self.run_with_limits(Some(duration), None)
    }

    /// Run an exact number of frames, then shutdown gracefully
    pub fn run_ticks(&mut self, ticks: u64) -> SerpentResult<()> {
        self.run_with_limits(None, Some(ticks))
    }

    fn run_with_limits(&mut self, duration: Option<Duration>, max_ticks: Option<u64>) -> SerpentResult<()> {
        self.config.validate()?;

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|e| SerpentError::Internal(format!("Failed to create tokio runtime: {}", e)))?;

        if self.config.install_signal_handler {
            self.install_signal_handler();
        }

        let period = self.config.tick_period();
        tracing::info!(
            scheduler = %self.config.name,
            nodes = self.nodes.len(),
            "Scheduler starting at {:.1} Hz",
            self.config.timing.global_rate_hz
        );

        rt.block_on(async {
            let start_time = Instant::now();
            let mut ticks_this_run = 0u64;
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            self.init_nodes();

            while self.is_running() {
                if let Some(max_duration) = duration {
                    if start_time.elapsed() >= max_duration {
                        tracing::debug!("Scheduler reached time limit of {:?}", max_duration);
                        break;
                    }
                }
                if max_ticks.is_some_and(|max| ticks_this_run >= max) {
                    break;
                }

                interval.tick().await;
                self.tick_once();
                ticks_this_run += 1;
            }
        });

        self.shutdown_nodes();
        tracing::info!(
            scheduler = %self.config.name,
            ticks = self.total_ticks,
            "Scheduler shutdown complete"
        );
        Ok(())
    }

    fn install_signal_handler(&self) {
        let running = self.running.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            eprintln!("{}", "\nCtrl+C received! Stopping snake scheduler...".red());
            running.store(false, Ordering::SeqCst);
        }) {
            // Only one handler per process; later schedulers rely on stop()
            tracing::warn!("Failed to set signal handler: {}", e);
        }
    }
}
