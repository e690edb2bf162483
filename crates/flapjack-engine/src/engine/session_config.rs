use serde::{Deserialize, Serialize};

use crate::{
    ConfigError,
    core::{Alphabet, Sequence},
};

use super::order_library::GeneratorParams;

/// Settings of a [`GameSession`](crate::GameSession), loadable from JSON.
///
/// Every field is optional in JSON; missing fields take their defaults.
///
/// ```
/// use flapjack_engine::SessionConfig;
///
/// let config: SessionConfig = serde_json::from_str(
///     r#"{"alphabet_size": 4, "opening_orders": [[4, 1]], "generator": {"warm_up_records": 5}}"#,
/// )
/// .unwrap();
/// assert_eq!(config.alphabet().unwrap().size(), 4);
/// assert_eq!(config.generator.warm_up_records, 5);
/// assert_eq!(config.generator.max_length, 6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Number of pickup kinds.
    pub alphabet_size: u8,
    /// Orders placed on the board before any are generated.
    pub opening_orders: Vec<Vec<u8>>,
    pub generator: GeneratorParams,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            alphabet_size: Alphabet::PANCAKES.size(),
            opening_orders: vec![vec![1, 2, 3], vec![2, 3, 2]],
            generator: GeneratorParams::default(),
        }
    }
}

impl SessionConfig {
    pub fn alphabet(&self) -> Result<Alphabet, ConfigError> {
        Alphabet::new(self.alphabet_size).map_err(ConfigError::Alphabet)
    }

    /// The opening orders as sequences over `alphabet`.
    pub fn opening_sequences(&self, alphabet: Alphabet) -> Result<Vec<Sequence>, ConfigError> {
        self.opening_orders
            .iter()
            .enumerate()
            .map(|(index, values)| {
                values
                    .iter()
                    .map(|&value| alphabet.symbol(value))
                    .collect::<Result<Sequence, _>>()
                    .map_err(|source| ConfigError::OpeningOrder { index, source })
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let alphabet = self.alphabet()?;
        self.opening_sequences(alphabet)?;
        self.generator.validate()
    }
}
