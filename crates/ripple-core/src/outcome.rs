use crate::ripple::RippleId;

/// Result of a user-facing ripple operation.
///
/// `StoreWriteFailed` and `SubscriptionLost` are reported but the UI treats
/// them as no-ops: nothing is retried and nothing is shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ok(Option<RippleId>),
    RejectedEmptyInput,
    StoreWriteFailed,
    SubscriptionLost,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }
}
