//! Policy trait and implementations.

pub mod learned;
#[cfg(feature = "nn")]
pub mod network;
pub mod random;
pub mod rule_based;
pub mod trait_;

pub use learned::{decode_q_values, FnPolicy, QValuePolicy};
#[cfg(feature = "nn")]
pub use network::{QNetwork, QNetworkPolicy};
pub use random::RandomPolicy;
pub use rule_based::RuleBasedPolicy;
pub use trait_::Policy;
