//! Admin session supervisor.
//!
//! A session has two clocks: when it started and when the admin last did
//! something. Evaluating them against a [`SessionPolicy`] yields one of three
//! states:
//!
//! - **Active** -- nothing to do.
//! - **Warning** -- the idle threshold is near; carries a countdown that
//!   starts at the warning lead time and reaches zero exactly when the
//!   session goes idle.
//! - **Expired** -- idle for too long, or older than the absolute cap.
//!   Expiry latches: no later activity can revive the session.
//!
//! The server rebuilds a supervisor from the stored clocks on every
//! authenticated request; a client can poll the resulting [`SessionSnapshot`]
//! to drive its own countdown UI.

use chrono::Duration;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Default idle threshold in minutes.
pub const DEFAULT_IDLE_TIMEOUT_MINS: i64 = 15;

/// Default warning lead time in minutes.
pub const DEFAULT_WARNING_LEAD_MINS: i64 = 2;

/// Default absolute session lifetime in minutes.
pub const DEFAULT_MAX_LIFETIME_MINS: i64 = 30;

/// Thresholds governing a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    pub idle_timeout: Duration,
    pub warning_lead: Duration,
    pub max_lifetime: Duration,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::minutes(DEFAULT_IDLE_TIMEOUT_MINS),
            warning_lead: Duration::minutes(DEFAULT_WARNING_LEAD_MINS),
            max_lifetime: Duration::minutes(DEFAULT_MAX_LIFETIME_MINS),
        }
    }
}

impl SessionPolicy {
    /// Build a policy from minute values.
    ///
    /// All three must be positive and the warning lead must be shorter than
    /// the idle threshold.
    pub fn from_minutes(idle: i64, warning: i64, max_lifetime: i64) -> Result<Self, CoreError> {
        if idle <= 0 || warning <= 0 || max_lifetime <= 0 {
            return Err(CoreError::Validation(
                "Session thresholds must be positive".to_string(),
            ));
        }
        if warning >= idle {
            return Err(CoreError::Validation(format!(
                "Warning lead ({warning} min) must be shorter than the idle timeout ({idle} min)"
            )));
        }
        Ok(Self {
            idle_timeout: Duration::minutes(idle),
            warning_lead: Duration::minutes(warning),
            max_lifetime: Duration::minutes(max_lifetime),
        })
    }

    /// Idle time after which the warning is shown.
    pub fn warning_threshold(&self) -> Duration {
        self.idle_timeout - self.warning_lead
    }
}

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryReason {
    /// No activity for the full idle threshold.
    Idle,
    /// The absolute lifetime cap was reached.
    Lifetime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Warning { remaining_secs: i64 },
    Expired(ExpiryReason),
}

impl SessionState {
    pub fn name(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Warning { .. } => "warning",
            Self::Expired(_) => "expired",
        }
    }
}

// ---------------------------------------------------------------------------
// Supervisor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SessionSupervisor {
    policy: SessionPolicy,
    started_at: Timestamp,
    last_activity_at: Timestamp,
    state: SessionState,
}

impl SessionSupervisor {
    /// Start a fresh session at `now`.
    pub fn login(policy: SessionPolicy, now: Timestamp) -> Self {
        Self {
            policy,
            started_at: now,
            last_activity_at: now,
            state: SessionState::Active,
        }
    }

    /// Rebuild a supervisor from persisted clocks. Call [`tick`](Self::tick)
    /// before trusting [`state`](Self::state).
    pub fn from_clocks(
        policy: SessionPolicy,
        started_at: Timestamp,
        last_activity_at: Timestamp,
    ) -> Self {
        Self {
            policy,
            started_at,
            last_activity_at,
            state: SessionState::Active,
        }
    }

    /// Resume a session after a reload.
    ///
    /// Returns `None` when the session is older than the lifetime cap.
    /// Otherwise the session is Active with the idle clock reset to `now`.
    pub fn restore(policy: SessionPolicy, started_at: Timestamp, now: Timestamp) -> Option<Self> {
        if now - started_at >= policy.max_lifetime {
            return None;
        }
        Some(Self::from_clocks(policy, started_at, now))
    }

    /// Re-evaluate the state at `now`.
    pub fn tick(&mut self, now: Timestamp) -> SessionState {
        if let SessionState::Expired(_) = self.state {
            return self.state;
        }

        let since_start = now - self.started_at;
        let idle = now - self.last_activity_at;

        self.state = if since_start >= self.policy.max_lifetime {
            SessionState::Expired(ExpiryReason::Lifetime)
        } else if idle >= self.policy.idle_timeout {
            SessionState::Expired(ExpiryReason::Idle)
        } else if idle >= self.policy.warning_threshold() {
            SessionState::Warning {
                remaining_secs: ceil_secs(self.policy.idle_timeout - idle),
            }
        } else {
            SessionState::Active
        };
        self.state
    }

    /// Record user activity. Returns `false` if the session has expired.
    pub fn record_activity(&mut self, now: Timestamp) -> bool {
        if self.is_expired_at(now) {
            return false;
        }
        self.last_activity_at = now;
        self.state = SessionState::Active;
        true
    }

    /// Restart both clocks ("extend session"). Returns `false` if expired.
    pub fn extend(&mut self, now: Timestamp) -> bool {
        if self.is_expired_at(now) {
            return false;
        }
        self.started_at = now;
        self.last_activity_at = now;
        self.state = SessionState::Active;
        true
    }

    fn is_expired_at(&mut self, now: Timestamp) -> bool {
        matches!(self.tick(now), SessionState::Expired(_))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn last_activity_at(&self) -> Timestamp {
        self.last_activity_at
    }

    /// Moment the session goes idle if nothing else happens.
    pub fn idle_deadline(&self) -> Timestamp {
        self.last_activity_at + self.policy.idle_timeout
    }

    /// Moment the lifetime cap is reached.
    pub fn lifetime_deadline(&self) -> Timestamp {
        self.started_at + self.policy.max_lifetime
    }

    /// Serializable view of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let (remaining_secs, reason) = match self.state {
            SessionState::Active => (None, None),
            SessionState::Warning { remaining_secs } => (Some(remaining_secs), None),
            SessionState::Expired(reason) => (Some(0), Some(reason)),
        };
        SessionSnapshot {
            state: self.state.name(),
            remaining_secs,
            reason,
            started_at: self.started_at,
            last_activity_at: self.last_activity_at,
            idle_expires_at: self.idle_deadline(),
            session_expires_at: self.lifetime_deadline(),
        }
    }
}

/// Whole seconds, rounded up, so a countdown shows 120 until a full second
/// has elapsed.
fn ceil_secs(d: Duration) -> i64 {
    let ms = d.num_milliseconds();
    if ms <= 0 {
        0
    } else {
        (ms + 999) / 1000
    }
}

/// What a client needs to render the session banner.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_secs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ExpiryReason>,
    pub started_at: Timestamp,
    pub last_activity_at: Timestamp,
    pub idle_expires_at: Timestamp,
    pub session_expires_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::*;

    fn t0() -> Timestamp {
        chrono::Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
    }

    fn mins(m: i64) -> Duration {
        Duration::minutes(m)
    }

    fn fresh() -> SessionSupervisor {
        SessionSupervisor::login(SessionPolicy::default(), t0())
    }

    #[test]
    fn login_starts_active() {
        let mut s = fresh();
        assert_eq!(s.state(), SessionState::Active);
        assert_eq!(s.tick(t0() + mins(5)), SessionState::Active);
    }

    #[test]
    fn warning_after_thirteen_idle_minutes() {
        let mut s = fresh();
        assert_eq!(
            s.tick(t0() + mins(13)),
            SessionState::Warning { remaining_secs: 120 }
        );
    }

    #[test]
    fn countdown_decrements_once_per_second() {
        let mut s = fresh();
        let warn_at = t0() + mins(13);
        assert_eq!(
            s.tick(warn_at + Duration::milliseconds(400)),
            SessionState::Warning { remaining_secs: 120 }
        );
        assert_eq!(
            s.tick(warn_at + Duration::seconds(1)),
            SessionState::Warning { remaining_secs: 119 }
        );
        assert_eq!(
            s.tick(warn_at + Duration::seconds(119)),
            SessionState::Warning { remaining_secs: 1 }
        );
    }

    #[test]
    fn expired_after_fifteen_idle_minutes() {
        let mut s = fresh();
        s.tick(t0() + mins(13));
        assert_eq!(
            s.tick(t0() + mins(15)),
            SessionState::Expired(ExpiryReason::Idle)
        );
    }

    #[test]
    fn activity_during_warning_returns_to_active() {
        let mut s = fresh();
        assert_matches!(s.tick(t0() + mins(14)), SessionState::Warning { .. });

        assert!(s.record_activity(t0() + mins(14)));
        assert_eq!(s.state(), SessionState::Active);
        assert_eq!(s.tick(t0() + mins(20)), SessionState::Active);
    }

    #[test]
    fn lifetime_cap_wins_over_continuous_activity() {
        let mut s = fresh();
        for minute in 1..30 {
            assert!(s.record_activity(t0() + mins(minute)));
        }
        assert_eq!(
            s.tick(t0() + mins(30)),
            SessionState::Expired(ExpiryReason::Lifetime)
        );
    }

    #[test]
    fn expiry_latches() {
        let mut s = fresh();
        s.tick(t0() + mins(16));
        assert!(!s.record_activity(t0() + mins(16)));
        assert!(!s.extend(t0() + mins(16)));
        assert_eq!(s.state(), SessionState::Expired(ExpiryReason::Idle));
    }

    #[test]
    fn activity_after_unobserved_expiry_does_not_revive() {
        let mut s = fresh();
        // Nothing ticked while the admin was away.
        assert!(!s.record_activity(t0() + mins(40)));
        assert_matches!(s.state(), SessionState::Expired(_));
    }

    #[test]
    fn extend_resets_both_clocks() {
        let mut s = fresh();
        s.tick(t0() + mins(14));
        assert!(s.extend(t0() + mins(14)));
        assert_eq!(s.started_at(), t0() + mins(14));
        assert_eq!(s.last_activity_at(), t0() + mins(14));
        // The old cap (t0 + 30) no longer applies.
        s.record_activity(t0() + mins(28));
        assert_eq!(s.tick(t0() + mins(31)), SessionState::Active);
    }

    #[test]
    fn restore_within_cap_resets_idle_clock() {
        let now = t0() + mins(20);
        let mut s = SessionSupervisor::restore(SessionPolicy::default(), t0(), now)
            .expect("session within cap");
        assert_eq!(s.last_activity_at(), now);
        assert_eq!(s.tick(now + mins(5)), SessionState::Active);
        assert_eq!(
            s.tick(now + mins(10)),
            SessionState::Expired(ExpiryReason::Lifetime)
        );
    }

    #[test]
    fn restore_beyond_cap_is_discarded() {
        assert!(SessionSupervisor::restore(SessionPolicy::default(), t0(), t0() + mins(30)).is_none());
    }

    #[test]
    fn snapshot_reports_deadlines() {
        let mut s = fresh();
        s.tick(t0() + mins(13));
        let snap = s.snapshot();
        assert_eq!(snap.state, "warning");
        assert_eq!(snap.remaining_secs, Some(120));
        assert_eq!(snap.idle_expires_at, t0() + mins(15));
        assert_eq!(snap.session_expires_at, t0() + mins(30));
    }

    #[test]
    fn policy_rejects_inverted_thresholds() {
        assert!(SessionPolicy::from_minutes(15, 2, 30).is_ok());
        assert!(SessionPolicy::from_minutes(2, 2, 30).is_err());
        assert!(SessionPolicy::from_minutes(15, 0, 30).is_err());
        assert_eq!(
            SessionPolicy::from_minutes(10, 1, 20).unwrap().warning_threshold(),
            mins(9)
        );
    }
}
