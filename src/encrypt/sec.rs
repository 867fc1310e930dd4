use ruint::aliases::U256;
use tracing::debug;

use super::k256::{modular_sqrt, B, P};
use super::{Coordinates, FieldElement, S256Point};
use crate::{EccError, FormatError};

const UNCOMPRESSED: u8 = 0x04;
const EVEN: u8 = 0x02;
const ODD: u8 = 0x03;

/// SEC 형식으로 직렬화된 점
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointSerialize {
    /// `0x02 | 0x03` + x (33 바이트)
    Compress([u8; 33]),
    /// `0x04` + x + y (65 바이트)
    Uncompress([u8; 65]),
}

impl PointSerialize {
    pub fn len(&self) -> usize {
        self.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, Self::Compress(_))
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.as_ref().to_vec()
    }
}

impl AsRef<[u8]> for PointSerialize {
    fn as_ref(&self) -> &[u8] {
        match self {
            PointSerialize::Compress(a) => &a[..],
            PointSerialize::Uncompress(a) => &a[..],
        }
    }
}

impl std::ops::Index<usize> for PointSerialize {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_ref()[index]
    }
}

impl S256Point {
    pub fn to_sec(&self, compressed: bool) -> Result<PointSerialize, EccError> {
        let Coordinates::Affine { x, y } = self.coords() else {
            return Err(EccError::InfinityEncoding);
        };

        let x_bytes: [u8; 32] = x.num().to_be_bytes();

        if compressed {
            let mut sec = [0_u8; 33];
            sec[0] = if y.num().bit(0) { ODD } else { EVEN };
            sec[1..].copy_from_slice(&x_bytes);

            Ok(PointSerialize::Compress(sec))
        } else {
            let y_bytes: [u8; 32] = y.num().to_be_bytes();

            let mut sec = [0_u8; 65];
            sec[0] = UNCOMPRESSED;
            sec[1..33].copy_from_slice(&x_bytes);
            sec[33..].copy_from_slice(&y_bytes);

            Ok(PointSerialize::Uncompress(sec))
        }
    }

    pub fn from_sec(sec: &[u8]) -> Result<Self, EccError> {
        let Some(&marker) = sec.first() else {
            return Err(FormatError::Empty.into());
        };

        match marker {
            UNCOMPRESSED => {
                expect_len(sec, 65)?;
                let x = U256::from_be_slice(&sec[1..33]);
                let y = U256::from_be_slice(&sec[33..]);

                Self::new(x, y)
            }
            EVEN | ODD => {
                expect_len(sec, 33)?;
                let x = FieldElement::new(U256::from_be_slice(&sec[1..]), P)?;

                // y² = x³ + 7
                let alpha = x.power(U256::from(3)).add(&FieldElement::new(B, P)?)?;
                let beta = modular_sqrt(&alpha)?;

                let (even_beta, odd_beta) = if beta.num().bit(0) {
                    (beta.negate(), beta)
                } else {
                    (beta, beta.negate())
                };
                let y = if marker == EVEN { even_beta } else { odd_beta };

                Self::new(x.num(), y.num())
            }
            other => {
                debug!(marker = other, "unknown SEC marker");
                Err(FormatError::UnknownMarker(other).into())
            }
        }
    }
}

impl TryFrom<&[u8]> for S256Point {
    type Error = EccError;

    fn try_from(sec: &[u8]) -> Result<Self, Self::Error> {
        Self::from_sec(sec)
    }
}

fn expect_len(sec: &[u8], expected: usize) -> Result<(), FormatError> {
    if sec.len() != expected {
        debug!(expected, actual = sec.len(), "SEC buffer has the wrong length");
        return Err(FormatError::Length { expected, actual: sec.len() });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encrypt::{G, N};
    use hex_literal::hex;

    const UNCOMPRESSED_G: [u8; 65] = hex!(
        "0479BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798
         483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8"
    );
    const COMPRESSED_G: [u8; 33] =
        hex!("0279BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798");
    const COMPRESSED_2G: [u8; 33] =
        hex!("02C6047F9441ED7D6D3045406E95C07CD85C778E4B8CEF3CA7ABAC09B95C709EE5");

    #[test]
    fn test_uncompress_sec() {
        let sec = G.to_sec(false).unwrap();
        assert_eq!(sec, PointSerialize::Uncompress(UNCOMPRESSED_G));
        assert_eq!(sec.len(), 65);
        assert_eq!(sec[0], 0x04);
    }

    #[test]
    fn test_compress_sec() {
        let sec = G.to_sec(true).unwrap();
        assert_eq!(sec.as_ref(), &COMPRESSED_G[..]);
        assert!(sec.is_compressed());

        let g2 = G.scalar_multiply(U256::from(2)).unwrap();
        assert_eq!(g2.to_sec(true).unwrap().as_ref(), &COMPRESSED_2G[..]);
    }

    #[test]
    fn test_compress_parity() {
        // -G 는 y 가 반대 짝홀
        let neg_g = G.negate();
        let sec = neg_g.to_sec(true).unwrap();
        assert_eq!(sec[0], 0x03);
        assert_eq!(&sec.as_ref()[1..], &COMPRESSED_G[1..]);
        assert_eq!(S256Point::from_sec(sec.as_ref()).unwrap(), neg_g);
    }

    #[test]
    fn test_parse_known_vectors() {
        assert_eq!(S256Point::from_sec(&UNCOMPRESSED_G).unwrap(), G);
        assert_eq!(S256Point::from_sec(&COMPRESSED_G).unwrap(), G);
        assert_eq!(S256Point::try_from(&COMPRESSED_2G[..]).unwrap(), G.scalar_multiply(U256::from(2)).unwrap());
    }

    #[test]
    fn test_round_trip() {
        for k in [1u64, 2, 3, 42, 999, 5000, 123456789] {
            let point = G.scalar_multiply(U256::from(k)).unwrap();

            for compressed in [true, false] {
                let sec = point.to_sec(compressed).unwrap();
                assert_eq!(S256Point::from_sec(sec.as_ref()).unwrap(), point, "k = {}, compressed = {}", k, compressed);
            }
        }

        let point = G.scalar_multiply(N - U256::from(7)).unwrap();
        let sec = point.to_sec(true).unwrap();
        assert_eq!(S256Point::from_sec(sec.as_ref()).unwrap(), point);
    }

    #[test]
    fn test_infinity_has_no_encoding() {
        assert_eq!(S256Point::infinity().to_sec(true).unwrap_err(), EccError::InfinityEncoding);
        assert_eq!(S256Point::infinity().to_sec(false).unwrap_err(), EccError::InfinityEncoding);
    }

    #[test]
    fn test_unknown_marker() {
        let mut sec = COMPRESSED_G;
        sec[0] = 0x05;
        assert_eq!(S256Point::from_sec(&sec).unwrap_err(), EccError::Format(FormatError::UnknownMarker(0x05)));

        assert_eq!(S256Point::from_sec(&[]).unwrap_err(), EccError::Format(FormatError::Empty));
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(
            S256Point::from_sec(&UNCOMPRESSED_G[..64]).unwrap_err(),
            EccError::Format(FormatError::Length { expected: 65, actual: 64 })
        );
        assert_eq!(
            S256Point::from_sec(&COMPRESSED_G[..20]).unwrap_err(),
            EccError::Format(FormatError::Length { expected: 33, actual: 20 })
        );
    }

    #[test]
    fn test_uncompressed_not_on_curve() {
        let mut sec = UNCOMPRESSED_G;
        sec[64] ^= 1;
        assert!(matches!(S256Point::from_sec(&sec), Err(EccError::NotOnCurve { .. })));
    }

    #[test]
    fn test_compressed_x_without_square_root() {
        // x = 5 이면 x³ + 7 = 132 는 F_P 에서 이차잉여가 아님
        let mut sec = [0_u8; 33];
        sec[0] = 0x02;
        sec[32] = 5;
        assert!(matches!(S256Point::from_sec(&sec), Err(EccError::NotOnCurve { .. })));
    }
}
