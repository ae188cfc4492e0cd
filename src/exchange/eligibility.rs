//! Whether the user can approve or swap right now, and what the action button says.
use alloy::primitives::U256;
use derive_more::Display;

use super::tx_state::CallState;

/// Label of the single action button.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ActionLabel {
    /// Router needs an allowance first
    #[display("Approve")]
    Approve,
    /// Approval call in flight
    #[display("Approving...")]
    Approving,
    /// Ready to swap
    #[display("Swap")]
    Swap,
    /// Swap call in flight
    #[display("Swapping...")]
    Swapping,
    /// Input exceeds the wallet balance
    #[display("Insufficient balance")]
    InsufficientBalance,
}

impl ActionLabel {
    /// The button triggers the approval call rather than the swap
    #[must_use]
    pub const fn is_approval(&self) -> bool {
        matches!(self, Self::Approve | Self::Approving)
    }
}

/// Eligibility predicates for one snapshot of the swap form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    /// Input exceeds the router's allowance
    pub approval_needed: bool,
    /// Input does not exceed the wallet balance
    pub has_sufficient_balance: bool,
    /// The approve action is available
    pub can_approve: bool,
    /// The swap action is available
    pub can_swap: bool,
    /// What the action button shows
    pub action: ActionLabel,
}

impl Eligibility {
    /// Evaluates the predicates.
    ///
    /// A balance that has not been read yet counts as zero.
    #[must_use]
    pub fn evaluate(
        amount_in: U256,
        allowance: U256,
        balance: Option<U256>,
        approve_state: &CallState,
        swap_state: &CallState,
    ) -> Self {
        let approving = approve_state.is_pending();
        let swapping = swap_state.is_pending();

        let approval_needed = amount_in > allowance;
        let has_sufficient_balance = amount_in <= balance.unwrap_or_default();
        let can_approve = !approving && approval_needed;
        let can_swap = !swapping && has_sufficient_balance && !amount_in.is_zero() && !approval_needed;

        let action = if approval_needed && !swapping {
            if approving {
                ActionLabel::Approving
            } else {
                ActionLabel::Approve
            }
        } else if swapping {
            ActionLabel::Swapping
        } else if has_sufficient_balance {
            ActionLabel::Swap
        } else {
            ActionLabel::InsufficientBalance
        };

        Self {
            approval_needed,
            has_sufficient_balance,
            can_approve,
            can_swap,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate(amount_in: u64, allowance: u64, balance: u64) -> Eligibility {
        Eligibility::evaluate(
            U256::from(amount_in),
            U256::from(allowance),
            Some(U256::from(balance)),
            &CallState::None,
            &CallState::None,
        )
    }

    #[test]
    fn test_ready_to_swap() {
        let eligibility = evaluate(100, 1_000, 500);
        assert!(!eligibility.approval_needed);
        assert!(eligibility.has_sufficient_balance);
        assert!(!eligibility.can_approve);
        assert!(eligibility.can_swap);
        assert_eq!(eligibility.action, ActionLabel::Swap);
        assert_eq!(eligibility.action.to_string(), "Swap");
    }

    #[test]
    fn test_cannot_swap_zero_input() {
        let eligibility = evaluate(0, 1_000, 500);
        assert!(eligibility.has_sufficient_balance);
        assert!(!eligibility.approval_needed);
        assert!(!eligibility.can_swap);
    }

    #[test]
    fn test_cannot_swap_when_approval_needed() {
        let eligibility = evaluate(100, 50, 500);
        assert!(eligibility.approval_needed);
        assert!(eligibility.can_approve);
        assert!(!eligibility.can_swap);
        assert_eq!(eligibility.action, ActionLabel::Approve);
    }

    #[test]
    fn test_cannot_swap_while_swapping() {
        let eligibility = Eligibility::evaluate(
            U256::from(100),
            U256::from(1_000),
            Some(U256::from(500)),
            &CallState::None,
            &CallState::Mining,
        );
        assert!(eligibility.has_sufficient_balance);
        assert!(!eligibility.approval_needed);
        assert!(!eligibility.can_swap);
        assert_eq!(eligibility.action, ActionLabel::Swapping);
    }

    #[test]
    fn test_insufficient_balance() {
        let eligibility = evaluate(600, 1_000, 500);
        assert!(!eligibility.has_sufficient_balance);
        assert!(!eligibility.can_swap);
        assert_eq!(eligibility.action, ActionLabel::InsufficientBalance);
        assert_eq!(eligibility.action.to_string(), "Insufficient balance");
    }

    #[test]
    fn test_unread_balance_is_zero() {
        let eligibility = Eligibility::evaluate(
            U256::from(1),
            U256::from(1_000),
            None,
            &CallState::None,
            &CallState::None,
        );
        assert!(!eligibility.has_sufficient_balance);
        assert!(!eligibility.can_swap);
    }

    #[test]
    fn test_approving() {
        let eligibility = Eligibility::evaluate(
            U256::from(100),
            U256::ZERO,
            Some(U256::from(500)),
            &CallState::PendingSignature,
            &CallState::None,
        );
        assert!(eligibility.approval_needed);
        assert!(!eligibility.can_approve);
        assert_eq!(eligibility.action, ActionLabel::Approving);
        assert!(eligibility.action.is_approval());
    }

    #[test]
    fn test_swapping_hides_approve_button() {
        let eligibility = Eligibility::evaluate(
            U256::from(100),
            U256::ZERO,
            Some(U256::from(500)),
            &CallState::None,
            &CallState::PendingSignature,
        );
        assert!(eligibility.approval_needed);
        assert!(eligibility.can_approve);
        assert_eq!(eligibility.action, ActionLabel::Swapping);
        assert!(!eligibility.action.is_approval());
    }
}
