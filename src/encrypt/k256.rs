use std::fmt;

use derive_more::Deref;
use ruint::aliases::U256;

use super::{Coordinates, Curve, CurvePoint, FieldElement};
use crate::EccError;

/// 유한체의 소수 `2^256 - 2^32 - 977`
pub const P: U256 = U256::from_limbs([
    0xFFFFFFFE_FFFFFC2F, 0xFFFFFFFF_FFFFFFFF, 0xFFFFFFFF_FFFFFFFF, 0xFFFFFFFF_FFFFFFFF,
]);

/// 생성점 G 가 만드는 군의 위수
pub const N: U256 = U256::from_limbs([
    0xBFD25E8C_D0364141, 0xBAAEDCE6_AF48A03B, 0xFFFFFFFF_FFFFFFFE, 0xFFFFFFFF_FFFFFFFF,
]);

pub const GX: U256 = U256::from_limbs([
    0x59F2815B_16F81798, 0x029BFCDB_2DCE28D9, 0x55A06295_CE870B07, 0x79BE667E_F9DCBBAC,
]);

pub const GY: U256 = U256::from_limbs([
    0x9C47D08F_FB10D4B8, 0xFD17B448_A6855419, 0x5DA4FBFC_0E1108A8, 0x483ADA77_26A3C465,
]);

pub const A: U256 = U256::ZERO;
pub const B: U256 = U256::from_limbs([7, 0, 0, 0]);

/// y² = x³ + 7 (mod P)
pub const SECP256K1: Curve = Curve::new_unchecked(
    FieldElement::new_unchecked(A, P),
    FieldElement::new_unchecked(B, P),
);

pub const G: S256Point = S256Point(CurvePoint::new_unchecked(
    FieldElement::new_unchecked(GX, P),
    FieldElement::new_unchecked(GY, P),
    SECP256K1,
));

/// secp256k1 곡선 위의 점
///
/// [`CurvePoint`]를 감싸며 `Deref`로 좌표 접근 같은 일반 연산을 그대로 씁니다.
///
/// ```rust
/// # use bitcoin_ecc::encrypt::{S256Point, G, N};
/// // N * G = 무한원점
/// assert!(G.scalar_multiply(N).unwrap().is_infinity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deref)]
pub struct S256Point(CurvePoint);

impl S256Point {
    pub fn new(x: U256, y: U256) -> Result<Self, EccError> {
        let x = FieldElement::new(x, P)?;
        let y = FieldElement::new(y, P)?;

        Ok(Self(CurvePoint::new(x, y, SECP256K1)?))
    }

    /// 좌표 중 하나라도 없으면 무한원점
    pub fn from_coordinates(x: Option<U256>, y: Option<U256>) -> Result<Self, EccError> {
        match (x, y) {
            (Some(x), Some(y)) => Self::new(x, y),
            _ => Ok(Self::infinity()),
        }
    }

    pub const fn infinity() -> Self {
        Self(CurvePoint::infinity(SECP256K1))
    }

    pub const fn generator() -> Self {
        G
    }

    pub fn add(&self, rhs: &Self) -> Result<Self, EccError> {
        self.0.add(&rhs.0).map(Self)
    }

    /// `n * self`
    ///
    /// 생성점에 대해서만 `n`을 위수 `N`으로 줄여 계산합니다. 다른 점은 G 가 만드는
    /// 부분군에 속한다는 보장이 없으므로 `n`을 그대로 씁니다.
    pub fn scalar_multiply(&self, n: U256) -> Result<Self, EccError> {
        let n = if *self == G { n % N } else { n };
        self.0.scalar_multiply(n).map(Self)
    }

    pub fn negate(&self) -> Self {
        Self(self.0.negate())
    }
}

impl TryFrom<CurvePoint> for S256Point {
    type Error = EccError;

    fn try_from(point: CurvePoint) -> Result<Self, Self::Error> {
        if *point.curve() != SECP256K1 {
            return Err(EccError::MismatchedCurve);
        }

        Ok(Self(point))
    }
}

impl fmt::Display for S256Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.coords() {
            Coordinates::Infinity => write!(f, "S256Point(infinity)"),
            Coordinates::Affine { x, y } => write!(f, "S256Point({}, {})", x, y),
        }
    }
}

/// `F_P`에서의 제곱근 `v^((P+1)/4)`
///
/// `P ≡ 3 (mod 4)`이므로 `v`가 이차잉여이면 두 제곱근 중 하나를 돌려줍니다.
/// 다른 하나는 `P - root`이며, 어느 쪽을 쓸지는 호출하는 쪽이 짝홀로 고릅니다.
pub fn modular_sqrt(v: &FieldElement) -> Result<FieldElement, EccError> {
    if v.prime() != P {
        return Err(EccError::MismatchedField { lhs: v.prime(), rhs: P });
    }

    Ok(v.power((P + U256::from(1)) / U256::from(4)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> U256 {
        U256::from_str_radix(s, 16).unwrap()
    }

    #[test]
    fn test_constants() {
        // P = 2^256 - 2^32 - 977
        let expected = U256::MAX - U256::from(1u64 << 32) - U256::from(977) + U256::from(1);
        assert_eq!(P, expected);

        assert_eq!(GX, hex("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"));
        assert_eq!(GY, hex("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"));
        assert_eq!(N, hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"));
    }

    #[test]
    fn test_generator_on_curve() {
        assert_eq!(S256Point::new(GX, GY).unwrap(), G);
        assert_eq!(S256Point::generator(), G);
    }

    #[test]
    fn test_new_invalid() {
        let err = S256Point::new(GX, GY + U256::from(1)).unwrap_err();
        assert!(matches!(err, EccError::NotOnCurve { .. }));

        let err = S256Point::new(P, GY).unwrap_err();
        assert_eq!(err, EccError::OutOfRange { value: P, prime: P });
    }

    #[test]
    fn test_from_coordinates() {
        assert!(S256Point::from_coordinates(None, None).unwrap().is_infinity());
        assert!(S256Point::from_coordinates(Some(GX), None).unwrap().is_infinity());
        assert_eq!(S256Point::from_coordinates(Some(GX), Some(GY)).unwrap(), G);
    }

    #[test]
    fn test_order() {
        // 줄이지 않은 일반 스칼라 곱으로 N * G 가 무한원점인지 확인
        assert!(G.0.scalar_multiply(N).unwrap().is_infinity());
        assert!(G.scalar_multiply(N).unwrap().is_infinity());

        for k in 1u64..=20 {
            assert!(!G.scalar_multiply(U256::from(k)).unwrap().is_infinity(), "{} * G is infinity", k);
        }
    }

    #[test]
    fn test_known_multiples() {
        let g2 = S256Point::new(
            hex("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"),
            hex("1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a"),
        )
        .unwrap();
        let g3 = S256Point::new(
            hex("f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9"),
            hex("388f7b0f632de8140fe337e62a37f3566500a99934c2231b6cb9fd7584b8e672"),
        )
        .unwrap();

        assert_eq!(G.add(&G).unwrap(), g2);
        assert_eq!(G.scalar_multiply(U256::from(2)).unwrap(), g2);
        assert_eq!(G.scalar_multiply(U256::from(3)).unwrap(), g3);
        assert_eq!(g2.add(&G).unwrap(), g3);
    }

    #[test]
    fn test_generator_scalar_reduced_mod_n() {
        let k = U256::from(12345u64);
        assert_eq!(G.scalar_multiply(N + k).unwrap(), G.scalar_multiply(k).unwrap());
        assert!(G.scalar_multiply(N - U256::from(1)).unwrap() == G.negate());
    }

    #[test]
    fn test_non_generator_scalar_not_reduced() {
        // 2G 는 G 가 아니므로 (N + 1) 을 그대로 사용하지만 결과는 같은 점
        let g2 = G.scalar_multiply(U256::from(2)).unwrap();
        assert_eq!(g2.scalar_multiply(N + U256::from(1)).unwrap(), g2);
    }

    #[test]
    fn test_modular_sqrt() {
        // GY^2 = GX^3 + 7 이므로 제곱근은 GY 또는 P - GY
        let x = FieldElement::new(GX, P).unwrap();
        let alpha = x.power(U256::from(3)).add(&FieldElement::new(B, P).unwrap()).unwrap();
        let beta = modular_sqrt(&alpha).unwrap();

        assert!(beta.num() == GY || beta.num() == P - GY);
        assert_eq!(beta.power(U256::from(2)), alpha);

        let other = FieldElement::new(U256::from(4), U256::from(7)).unwrap();
        assert!(matches!(modular_sqrt(&other), Err(EccError::MismatchedField { .. })));
    }

    #[test]
    fn test_try_from_curve_point() {
        assert_eq!(S256Point::try_from(*G).unwrap(), G);

        let prime = U256::from(223);
        let curve = Curve::new(
            FieldElement::new(U256::ZERO, prime).unwrap(),
            FieldElement::new(U256::from(7), prime).unwrap(),
        )
        .unwrap();
        assert_eq!(S256Point::try_from(CurvePoint::infinity(curve)).unwrap_err(), EccError::MismatchedCurve);
    }
}
