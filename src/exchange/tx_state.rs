//! Lifecycle of the approval and swap calls, folded into one user-facing status.
use derive_more::Display;

/// Lifecycle state of one call to the wallet/contract layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CallState {
    /// Nothing sent yet, or the state was reset
    #[default]
    None,
    /// Waiting for the user to sign in the wallet
    PendingSignature,
    /// Signed and waiting to be mined
    Mining,
    /// Mined successfully
    Success,
    /// Mined but reverted, or rejected by the wallet
    Failed(String),
    /// Failed before reaching the chain (network, RPC, encoding)
    Exception(String),
}

impl CallState {
    /// Nothing happening for this call
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The call is waiting for a signature or for inclusion
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::PendingSignature | Self::Mining)
    }

    /// The call finished, successfully or not
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed(_) | Self::Exception(_))
    }

    /// Error text of a failed call
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) | Self::Exception(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Which of the two calls a status refers to.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// ERC-20 `approve` of the router
    #[display("Approval")]
    Approve,
    /// Router `swapExactTokensForTokens`
    #[display("Swap")]
    Swap,
}

/// The single status shown to the user for both calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxStatus {
    /// Neither call has started
    Idle,
    /// A call is waiting for a signature or for inclusion
    Pending(CallKind),
    /// A call finished successfully
    Succeeded(CallKind),
    /// A call failed
    Failed {
        /// The call that failed
        kind: CallKind,
        /// Error text, already on a single line
        reason: String,
    },
}

impl TxStatus {
    /// A success or failure the user should see
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed { .. })
    }

    /// Either call is in flight
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Success message, if a call succeeded
    #[must_use]
    pub fn success_message(&self) -> Option<String> {
        match self {
            Self::Succeeded(CallKind::Approve) => Some("Approval successful".to_string()),
            Self::Succeeded(CallKind::Swap) => Some("Swap executed successfully".to_string()),
            _ => None,
        }
    }

    /// Failure message, if a call failed
    #[must_use]
    pub fn failure_message(&self) -> Option<String> {
        match self {
            Self::Failed { kind, reason } => Some(format!("{kind} failed - {reason}")),
            _ => None,
        }
    }

    /// The line to display, if any. Pending operations carry no message.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.failure_message().or_else(|| self.success_message())
    }
}

/// Folds the approval and swap call states into one status.
///
/// Pending beats everything. Otherwise the swap state is reported whenever it
/// is not idle, since the swap is what the user is after; the approval state
/// is reported only while the swap has not started.
#[must_use]
pub fn classify(approve: &CallState, swap: &CallState) -> TxStatus {
    if swap.is_pending() {
        return TxStatus::Pending(CallKind::Swap);
    }
    if approve.is_pending() {
        return TxStatus::Pending(CallKind::Approve);
    }

    let (kind, state) = if swap.is_idle() {
        (CallKind::Approve, approve)
    } else {
        (CallKind::Swap, swap)
    };

    if matches!(state, CallState::Success) {
        return TxStatus::Succeeded(kind);
    }
    state.error().map_or(TxStatus::Idle, |reason| TxStatus::Failed {
        kind,
        reason: one_line(reason),
    })
}

/// Collapses an error text onto a single line.
///
/// Wallet and RPC errors often come back as multi-line dumps; all whitespace
/// runs become one space.
#[must_use]
pub fn one_line(text: &str) -> String {
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.is_empty() {
        "unknown error".to_string()
    } else {
        line
    }
}
