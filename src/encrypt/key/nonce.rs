use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use ruint::aliases::U256;

use super::N;

/// 서명 때 쓰는 논스 `k`의 공급원
///
/// 구현은 `[0, N)`에서 균등하고 예측할 수 없는 값을 돌려줘야 합니다.
/// 같은 키로 두 번 같은 `k`를 쓰거나 `k`를 예측할 수 있으면 비밀키가 드러납니다.
pub trait NonceSource {
    fn nonce(&mut self) -> U256;
}

/// 암호학적으로 안전한 난수 생성기를 [`NonceSource`]로 쓰는 어댑터
#[derive(Debug, Clone, Default)]
pub struct RandomNonce<R>(R);

impl<R> RandomNonce<R>
where
    R: RngCore + CryptoRng,
{
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RandomNonce<OsRng> {
    pub fn os() -> Self {
        Self(OsRng)
    }
}

impl<R> NonceSource for RandomNonce<R>
where
    R: RngCore + CryptoRng,
{
    fn nonce(&mut self) -> U256 {
        sample_below_n(&mut self.0)
    }
}

/// 32 바이트를 뽑아 `N`보다 작을 때까지 다시 뽑습니다. 나머지 연산을 쓰지 않아 편향이 없습니다.
pub(crate) fn sample_below_n<R>(rng: &mut R) -> U256
where
    R: RngCore + CryptoRng,
{
    loop {
        let mut bytes = [0_u8; 32];
        rng.fill_bytes(&mut bytes);

        let candidate = U256::from_be_bytes(bytes);
        if candidate < N {
            return candidate;
        }
    }
}
