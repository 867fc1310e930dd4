use ruint::aliases::U256;
use sha2::{Digest, Sha256};

/// `sha256(sha256(message))`를 빅엔디안 정수로 읽은 다이제스트
pub fn hash256(message: &[u8]) -> U256 {
    let digest = Sha256::digest(Sha256::digest(message));
    U256::from_be_slice(&digest)
}
