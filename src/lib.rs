//! 유한체 산술부터 secp256k1 ECDSA 까지 직접 구현한 타원 곡선 라이브러리
//!
//! * [`encrypt::FieldElement`] - 소수 모듈러스 위의 유한체 원소
//! * [`encrypt::CurvePoint`] - `y² = x³ + ax + b` 위의 점과 군 연산
//! * [`encrypt::S256Point`] - secp256k1 곡선의 점, SEC 직렬화, 서명 검증
//! * [`encrypt::PrivateKey`] - 비밀키와 서명
//!
//! ```rust
//! use bitcoin_ecc::encrypt::{hash256, PrivateKey, RandomNonce, S256Point};
//! use ruint::aliases::U256;
//!
//! let key = PrivateKey::new(U256::from(0x12345deadbeefu64)).unwrap();
//! let z = hash256(b"my message");
//! let sig = key.sign(z, &mut RandomNonce::os()).unwrap();
//!
//! let sec = key.public_point().to_sec(true).unwrap();
//! let point = S256Point::from_sec(sec.as_ref()).unwrap();
//! assert!(point.verify(z, &sig));
//! ```

pub mod encrypt;
mod error;

pub use error::{DerError, EccError, FormatError};
