//! Workflow states.

use std::fmt;

/// Stages of a wrap, in the order they are entered.
///
/// Any failure moves straight to [`WorkflowState::Failed`]; no stage is re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowState {
    Validating,
    DerivingAddress,
    Connecting,
    CheckingBalance,
    FetchingFees,
    Building,
    Signing,
    Broadcasting,
    AwaitingReceipt,
    Succeeded,
    Failed,
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::DerivingAddress => "deriving_address",
            Self::Connecting => "connecting",
            Self::CheckingBalance => "checking_balance",
            Self::FetchingFees => "fetching_fees",
            Self::Building => "building",
            Self::Signing => "signing",
            Self::Broadcasting => "broadcasting",
            Self::AwaitingReceipt => "awaiting_receipt",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    /// The stage that follows this one on success.
    pub fn next(&self) -> Option<Self> {
        let next = match self {
            Self::Validating => Self::DerivingAddress,
            Self::DerivingAddress => Self::Connecting,
            Self::Connecting => Self::CheckingBalance,
            Self::CheckingBalance => Self::FetchingFees,
            Self::FetchingFees => Self::Building,
            Self::Building => Self::Signing,
            Self::Signing => Self::Broadcasting,
            Self::Broadcasting => Self::AwaitingReceipt,
            Self::AwaitingReceipt => Self::Succeeded,
            Self::Succeeded | Self::Failed => return None,
        };
        Some(next)
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
