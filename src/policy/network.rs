//! Q-network policy using tch-rs (PyTorch bindings).
//!
//! A plain MLP scoring the nine discrete moves of every unit. Weights start
//! untrained; training and checkpoint handling live outside this crate and
//! reach the network through [`QNetwork::var_store_mut`].
//! This module is only available with the `nn` feature.

use tch::{nn, nn::Module, Device, Kind, Tensor};

use super::learned::{decode_q_values, Q_OUTPUT_DIM};
use super::trait_::Policy;
use crate::action::Action;
use crate::observation::{Observation, FEATURE_DIM};

/// Hidden layer widths.
const HIDDEN: [i64; 3] = [256, 128, 64];

/// MLP Q-network: `FEATURE_DIM → 256 → 128 → 64 → Q_OUTPUT_DIM`, ReLU between
/// layers.
pub struct QNetwork {
    vs: nn::VarStore,
    net: nn::Sequential,
}

impl QNetwork {
    /// Creates a freshly initialised network.
    ///
    /// # Arguments
    ///
    /// * `device` - Device to run on (CPU or CUDA)
    pub fn new(device: Device) -> Self {
        let vs = nn::VarStore::new(device);
        let p = &vs.root();
        let net = nn::seq()
            .add(nn::linear(
                p / "l1",
                FEATURE_DIM as i64,
                HIDDEN[0],
                Default::default(),
            ))
            .add_fn(|x| x.relu())
            .add(nn::linear(p / "l2", HIDDEN[0], HIDDEN[1], Default::default()))
            .add_fn(|x| x.relu())
            .add(nn::linear(p / "l3", HIDDEN[1], HIDDEN[2], Default::default()))
            .add_fn(|x| x.relu())
            .add(nn::linear(
                p / "l4",
                HIDDEN[2],
                Q_OUTPUT_DIM as i64,
                Default::default(),
            ));

        Self { vs, net }
    }

    /// Forward pass on a `[batch, FEATURE_DIM]` tensor.
    pub fn forward(&self, features: &Tensor) -> Tensor {
        self.net.forward(features)
    }

    /// Scores a single feature vector; returns [`Q_OUTPUT_DIM`] values.
    pub fn q_values(&self, features: &[f32]) -> Vec<f32> {
        let _guard = tch::no_grad_guard();
        let input = Tensor::from_slice(features)
            .to_device(self.vs.device())
            .unsqueeze(0);
        let out = self
            .forward(&input)
            .squeeze_dim(0)
            .to_kind(Kind::Float)
            .to_device(Device::Cpu);
        Vec::<f32>::try_from(&out).unwrap_or_default()
    }

    /// Returns a mutable reference to the variable store for loading weights.
    pub fn var_store_mut(&mut self) -> &mut nn::VarStore {
        &mut self.vs
    }

    /// Returns a reference to the variable store.
    pub fn var_store(&self) -> &nn::VarStore {
        &self.vs
    }
}

/// Greedy policy over a [`QNetwork`].
pub struct QNetworkPolicy {
    network: QNetwork,
}

impl QNetworkPolicy {
    pub fn new(network: QNetwork) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &QNetwork {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut QNetwork {
        &mut self.network
    }
}

impl Policy for QNetworkPolicy {
    fn decide(&mut self, observation: &Observation) -> Action {
        decode_q_values(&self.network.q_values(&observation.features()))
    }

    fn name(&self) -> &str {
        "q_network"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::FIGHTER_COUNT;

    #[test]
    fn forward_shape() {
        let net = QNetwork::new(Device::Cpu);
        let x = Tensor::randn([3, FEATURE_DIM as i64], (Kind::Float, Device::Cpu));
        assert_eq!(net.forward(&x).size(), &[3, Q_OUTPUT_DIM as i64]);
    }

    #[test]
    fn q_values_length() {
        let net = QNetwork::new(Device::Cpu);
        assert_eq!(net.q_values(&[0.5; FEATURE_DIM]).len(), Q_OUTPUT_DIM);
    }

    #[test]
    fn policy_commands_every_unit() {
        let mut policy = QNetworkPolicy::new(QNetwork::new(Device::Cpu));
        let action = policy.decide(&Observation::default());
        assert_eq!(action.commands().count(), FIGHTER_COUNT + 1);
    }
}
