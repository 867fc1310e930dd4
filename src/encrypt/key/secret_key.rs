use std::fmt;

use rand::{CryptoRng, RngCore};
use ruint::aliases::U256;
use tracing::trace;

use super::nonce::{sample_below_n, NonceSource};
use super::{FieldElement, Signature, G, N};
use crate::encrypt::{to_hex, S256Point};
use crate::EccError;

/// 비밀키 `e`와 그 공개키 `eG`
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PrivateKey {
    secret: FieldElement,
    point: S256Point,
}

impl PrivateKey {
    pub fn new(secret: U256) -> Result<Self, EccError> {
        let secret = FieldElement::new(secret, N)?;
        let point = G.scalar_multiply(secret.num())?;

        Ok(Self { secret, point })
    }

    pub fn random<R>(rng: &mut R) -> Result<Self, EccError>
    where
        R: RngCore + CryptoRng,
    {
        Self::new(sample_below_n(rng))
    }

    pub fn secret(&self) -> U256 {
        self.secret.num()
    }

    pub fn public_point(&self) -> S256Point {
        self.point
    }

    /// 비밀키를 0으로 채운 64자리 16진수로
    pub fn hex(&self) -> String {
        to_hex(self.secret.num())
    }

    /// 다이제스트 `z`에 서명합니다.
    ///
    /// `s = (z + re) / k`, `r`은 `kG`의 x 좌표입니다. `k = 0`, `r = 0`, `s = 0` 이 나오면
    /// 새 논스로 다시 시도하며, `s > N/2` 이면 `N - s`로 바꿔 low-s 형태로 맞춥니다.
    pub fn sign<S>(&self, z: U256, nonces: &mut S) -> Result<Signature, EccError>
    where
        S: NonceSource + ?Sized,
    {
        let z = FieldElement::new(z % N, N)?;
        let half_n = N / U256::from(2);

        loop {
            let k = nonces.nonce();
            if k.is_zero() || k >= N {
                trace!("nonce outside [1, N), drawing again");
                continue;
            }

            let Some(x) = G.scalar_multiply(k)?.x() else {
                trace!("kG is the point at infinity, drawing again");
                continue;
            };

            let r = FieldElement::new(x.num() % N, N)?;
            if r.is_zero() {
                trace!("r = 0, drawing again");
                continue;
            }

            let k_inv = FieldElement::new(k, N)?.power(N - U256::from(2));
            let s = z.add(&r.multiply(&self.secret)?)?.multiply(&k_inv)?;
            if s.is_zero() {
                trace!("s = 0, drawing again");
                continue;
            }

            let s = if s.num() > half_n { s.negate() } else { s };

            return Ok(Signature::new(r.num(), s.num()));
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").field("point", &self.point).finish_non_exhaustive()
    }
}
