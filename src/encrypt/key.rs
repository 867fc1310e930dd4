mod nonce;
mod secret_key;

use super::{FieldElement, Signature, G, N};

pub use nonce::{NonceSource, RandomNonce};
pub use secret_key::PrivateKey;
