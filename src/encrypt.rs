mod digest;
mod elliptic_curve;
mod k256;
mod key;
mod sec;
mod signature;

pub use digest::hash256;
pub use elliptic_curve::{to_hex, Coordinates, Curve, CurvePoint, FieldElement};
pub use k256::{modular_sqrt, S256Point, A, B, G, GX, GY, N, P, SECP256K1};
pub use key::{NonceSource, PrivateKey, RandomNonce};
pub use sec::PointSerialize;
pub use signature::Signature;
