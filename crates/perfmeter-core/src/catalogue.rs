//! Known metric names and the startup pre-registration catalogue.

use serde::Deserialize;

/// Suffix of the count source registered next to every duration metric.
pub const COUNT_SUFFIX: &str = "_count";

// DKG
pub const DKG_JOINED_TOTAL: &str = "dkg_joined_total";
pub const DKG_FAILED_TOTAL: &str = "dkg_failed_total";
pub const DKG_DURATION_SECONDS: &str = "dkg_duration_seconds";
pub const DKG_VALIDATION_TOTAL: &str = "dkg_validation_total";
pub const DKG_CHALLENGES_SUBMITTED_TOTAL: &str = "dkg_challenges_submitted_total";
pub const DKG_APPROVALS_SUBMITTED_TOTAL: &str = "dkg_approvals_submitted_total";
pub const DKG_REQUESTED_TOTAL: &str = "dkg_requested_total";

// Signing
pub const SIGNING_OPERATIONS_TOTAL: &str = "signing_operations_total";
pub const SIGNING_SUCCESS_TOTAL: &str = "signing_success_total";
pub const SIGNING_FAILED_TOTAL: &str = "signing_failed_total";
pub const SIGNING_DURATION_SECONDS: &str = "signing_duration_seconds";
pub const SIGNING_ATTEMPTS_PER_OPERATION: &str = "signing_attempts_per_operation";
pub const SIGNING_TIMEOUTS_TOTAL: &str = "signing_timeouts_total";

// Wallet actions
pub const WALLET_ACTIONS_TOTAL: &str = "wallet_actions_total";
pub const WALLET_ACTION_SUCCESS_TOTAL: &str = "wallet_action_success_total";
pub const WALLET_ACTION_FAILED_TOTAL: &str = "wallet_action_failed_total";
pub const WALLET_ACTION_DURATION_SECONDS: &str = "wallet_action_duration_seconds";
pub const WALLET_HEARTBEAT_FAILURES_TOTAL: &str = "wallet_heartbeat_failures_total";

// Coordination
pub const COORDINATION_WINDOWS_DETECTED_TOTAL: &str = "coordination_windows_detected_total";
pub const COORDINATION_PROCEDURES_EXECUTED_TOTAL: &str = "coordination_procedures_executed_total";
pub const COORDINATION_FAILED_TOTAL: &str = "coordination_failed_total";
pub const COORDINATION_DURATION_SECONDS: &str = "coordination_duration_seconds";

// Network
pub const INCOMING_MESSAGE_QUEUE_SIZE: &str = "incoming_message_queue_size";
pub const MESSAGE_HANDLER_QUEUE_SIZE: &str = "message_handler_queue_size";
pub const PEER_CONNECTIONS_TOTAL: &str = "peer_connections_total";
pub const PEER_DISCONNECTIONS_TOTAL: &str = "peer_disconnections_total";
pub const MESSAGE_BROADCAST_TOTAL: &str = "message_broadcast_total";
pub const MESSAGE_RECEIVED_TOTAL: &str = "message_received_total";
pub const PING_TEST_TOTAL: &str = "ping_test_total";
pub const PING_TEST_SUCCESS_TOTAL: &str = "ping_test_success_total";
pub const PING_TEST_FAILED_TOTAL: &str = "ping_test_failed_total";
pub const PING_TEST_DURATION_SECONDS: &str = "ping_test_duration_seconds";

// Wallet dispatcher
pub const WALLET_DISPATCHER_ACTIVE_ACTIONS: &str = "wallet_dispatcher_active_actions";
pub const WALLET_DISPATCHER_REJECTED_TOTAL: &str = "wallet_dispatcher_rejected_total";

// Relay entry (beacon)
pub const RELAY_ENTRY_GENERATION_TOTAL: &str = "relay_entry_generation_total";
pub const RELAY_ENTRY_SUCCESS_TOTAL: &str = "relay_entry_success_total";
pub const RELAY_ENTRY_FAILED_TOTAL: &str = "relay_entry_failed_total";
pub const RELAY_ENTRY_DURATION_SECONDS: &str = "relay_entry_duration_seconds";
pub const RELAY_ENTRY_TIMEOUT_REPORTED_TOTAL: &str = "relay_entry_timeout_reported_total";

const BUILTIN_COUNTERS: &[&str] = &[
    DKG_JOINED_TOTAL,
    DKG_FAILED_TOTAL,
    DKG_VALIDATION_TOTAL,
    DKG_CHALLENGES_SUBMITTED_TOTAL,
    DKG_APPROVALS_SUBMITTED_TOTAL,
    DKG_REQUESTED_TOTAL,
    SIGNING_OPERATIONS_TOTAL,
    SIGNING_SUCCESS_TOTAL,
    SIGNING_FAILED_TOTAL,
    SIGNING_TIMEOUTS_TOTAL,
    WALLET_ACTIONS_TOTAL,
    WALLET_ACTION_SUCCESS_TOTAL,
    WALLET_ACTION_FAILED_TOTAL,
    WALLET_DISPATCHER_REJECTED_TOTAL,
    COORDINATION_WINDOWS_DETECTED_TOTAL,
    COORDINATION_PROCEDURES_EXECUTED_TOTAL,
    COORDINATION_FAILED_TOTAL,
    PEER_CONNECTIONS_TOTAL,
    PEER_DISCONNECTIONS_TOTAL,
    MESSAGE_BROADCAST_TOTAL,
    MESSAGE_RECEIVED_TOTAL,
    PING_TEST_TOTAL,
    PING_TEST_SUCCESS_TOTAL,
    PING_TEST_FAILED_TOTAL,
];

const BUILTIN_GAUGES: &[&str] = &[
    WALLET_DISPATCHER_ACTIVE_ACTIONS,
    INCOMING_MESSAGE_QUEUE_SIZE,
    MESSAGE_HANDLER_QUEUE_SIZE,
];

const BUILTIN_DURATIONS: &[&str] = &[
    DKG_DURATION_SECONDS,
    SIGNING_DURATION_SECONDS,
    WALLET_ACTION_DURATION_SECONDS,
    COORDINATION_DURATION_SECONDS,
    PING_TEST_DURATION_SECONDS,
];

/// Metric names registered with the scheduler at construction, before any
/// write, so the export surface is complete from startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalogue {
    #[serde(default)]
    pub counters: Vec<String>,
    #[serde(default)]
    pub gauges: Vec<String>,
    /// Duration metrics; each registers an average source and a `_count` source.
    #[serde(default)]
    pub durations: Vec<String>,
}

impl Catalogue {
    /// The client's standard set of counters, gauges and duration metrics.
    pub fn builtin() -> Self {
        fn owned(names: &[&str]) -> Vec<String> {
            names.iter().map(|s| s.to_string()).collect()
        }
        Self {
            counters: owned(BUILTIN_COUNTERS),
            gauges: owned(BUILTIN_GAUGES),
            durations: owned(BUILTIN_DURATIONS),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty() && self.gauges.is_empty() && self.durations.is_empty()
    }

    /// Number of sources pre-registration hands to the scheduler.
    pub fn source_count(&self) -> usize {
        self.counters.len() + self.gauges.len() + 2 * self.durations.len()
    }
}
