//! Backend configuration

use rand::Rng;

/// How the mock payment gateway decides a charge
///
/// The production-like default approves 90% of charges at random; tests
/// pin `Approve` or `Decline` for determinism.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaymentPolicy {
    /// Approve every charge
    Approve,
    /// Decline every charge
    Decline,
    /// Approve with the given probability
    Random {
        /// Approval probability in `0.0..=1.0`
        approve_rate: f64,
    },
}

impl PaymentPolicy {
    /// Decide one charge
    pub fn approve(&self) -> bool {
        match self {
            PaymentPolicy::Approve => true,
            PaymentPolicy::Decline => false,
            PaymentPolicy::Random { approve_rate } => {
                rand::thread_rng().gen_bool(approve_rate.clamp(0.0, 1.0))
            }
        }
    }
}

impl Default for PaymentPolicy {
    fn default() -> Self {
        PaymentPolicy::Random { approve_rate: 0.9 }
    }
}

/// Configuration for [`Backend`](crate::Backend)
///
/// ```
/// use eventide_api::{BackendConfig, PaymentPolicy};
///
/// let config = BackendConfig::default()
///     .demo_identity(true)
///     .payment_policy(PaymentPolicy::Approve);
/// assert!(config.demo_identity);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    /// When the identity provider is unreachable, sign in the fixed demo
    /// identity instead of failing login. Off by default; demo deployments
    /// opt in explicitly.
    pub demo_identity: bool,
    /// Payment approval policy
    pub payment_policy: PaymentPolicy,
}

impl BackendConfig {
    /// Enable or disable the demo-identity fallback
    pub fn demo_identity(mut self, enabled: bool) -> Self {
        self.demo_identity = enabled;
        self
    }

    /// Set the payment approval policy
    pub fn payment_policy(mut self, policy: PaymentPolicy) -> Self {
        self.payment_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_policies_are_deterministic() {
        assert!(PaymentPolicy::Approve.approve());
        assert!(!PaymentPolicy::Decline.approve());
    }

    #[test]
    fn random_extremes() {
        assert!(PaymentPolicy::Random { approve_rate: 1.0 }.approve());
        assert!(!PaymentPolicy::Random { approve_rate: 0.0 }.approve());
    }

    #[test]
    fn defaults() {
        let config = BackendConfig::default();
        assert!(!config.demo_identity);
        assert_eq!(
            config.payment_policy,
            PaymentPolicy::Random { approve_rate: 0.9 }
        );
    }
}
