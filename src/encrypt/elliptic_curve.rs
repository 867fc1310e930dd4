mod finite_field;

use std::fmt;

use ruint::aliases::U256;

use crate::EccError;

pub use finite_field::{to_hex, FieldElement};

/// 유한체 위의 타원 곡선 `y² = x³ + ax + b (mod p)`
///
/// 계수 `a`, `b`는 같은 유한체의 원소여야 하며, 곡선 위의 모든 점은 이 값을 복사해 가지고 있습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Curve {
    a: FieldElement,
    b: FieldElement,
}

impl Curve {
    pub fn new(a: FieldElement, b: FieldElement) -> Result<Self, EccError> {
        if a.prime() != b.prime() {
            return Err(EccError::MismatchedField { lhs: a.prime(), rhs: b.prime() });
        }

        Ok(Self { a, b })
    }

    pub(crate) const fn new_unchecked(a: FieldElement, b: FieldElement) -> Self {
        Self { a, b }
    }

    pub fn a(&self) -> FieldElement {
        self.a
    }

    pub fn b(&self) -> FieldElement {
        self.b
    }

    pub fn prime(&self) -> U256 {
        self.a.prime()
    }

    /// `(x, y)`가 곡선 방정식을 만족하는지 확인합니다.
    pub fn contains(&self, x: &FieldElement, y: &FieldElement) -> Result<bool, EccError> {
        for coord in [x, y] {
            if coord.prime() != self.prime() {
                return Err(EccError::MismatchedField { lhs: self.prime(), rhs: coord.prime() });
            }
        }

        let left = y.power(U256::from(2));
        let right = x
            .power(U256::from(3))
            .add(&self.a.multiply(x)?)?
            .add(&self.b)?;

        Ok(left == right)
    }
}

/// 점의 좌표. 무한원점은 좌표가 없는 별도의 경우로 표현합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coordinates {
    Infinity,
    Affine { x: FieldElement, y: FieldElement },
}

/// 곡선 위의 점
///
/// # 지원하는 연산
///
/// * **점 덧셈**: [`CurvePoint::add`]
/// * **스칼라 곱셈**: [`CurvePoint::scalar_multiply`] - 이진 double-and-add
/// * **무한원점**: [`CurvePoint::infinity`] - 덧셈의 항등원
///
/// ```rust
/// # use bitcoin_ecc::encrypt::{Curve, CurvePoint, FieldElement};
/// # use ruint::aliases::U256;
/// let prime = U256::from(223);
/// let fe = |n: u64| FieldElement::new(U256::from(n), prime).unwrap();
/// let curve = Curve::new(fe(0), fe(7)).unwrap();
///
/// let p = CurvePoint::new(fe(170), fe(142), curve).unwrap();
/// let q = CurvePoint::new(fe(60), fe(139), curve).unwrap();
/// assert_eq!(p.add(&q).unwrap(), CurvePoint::new(fe(220), fe(181), curve).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurvePoint {
    curve: Curve,
    coords: Coordinates,
}

impl CurvePoint {
    pub fn new(x: FieldElement, y: FieldElement, curve: Curve) -> Result<Self, EccError> {
        if !curve.contains(&x, &y)? {
            return Err(EccError::NotOnCurve { x: x.num(), y: y.num() });
        }

        Ok(Self { curve, coords: Coordinates::Affine { x, y } })
    }

    pub const fn infinity(curve: Curve) -> Self {
        Self { curve, coords: Coordinates::Infinity }
    }

    pub(crate) const fn new_unchecked(x: FieldElement, y: FieldElement, curve: Curve) -> Self {
        Self { curve, coords: Coordinates::Affine { x, y } }
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn coords(&self) -> Coordinates {
        self.coords
    }

    pub fn x(&self) -> Option<FieldElement> {
        match self.coords {
            Coordinates::Affine { x, .. } => Some(x),
            Coordinates::Infinity => None,
        }
    }

    pub fn y(&self) -> Option<FieldElement> {
        match self.coords {
            Coordinates::Affine { y, .. } => Some(y),
            Coordinates::Infinity => None,
        }
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self.coords, Coordinates::Infinity)
    }

    /// y 좌표의 부호를 뒤집은 점 `-P`
    pub fn negate(&self) -> Self {
        match self.coords {
            Coordinates::Infinity => *self,
            Coordinates::Affine { x, y } => Self::new_unchecked(x, y.negate(), self.curve),
        }
    }

    pub fn add(&self, rhs: &Self) -> Result<Self, EccError> {
        if self.curve != rhs.curve {
            return Err(EccError::MismatchedCurve);
        }

        let (x1, y1, x2, y2) = match (self.coords, rhs.coords) {
            (Coordinates::Infinity, _) => return Ok(*rhs),
            (_, Coordinates::Infinity) => return Ok(*self),
            (Coordinates::Affine { x: x1, y: y1 }, Coordinates::Affine { x: x2, y: y2 }) => {
                (x1, y1, x2, y2)
            }
        };

        // (P, -P), y = 0 인 접선이 수직인 경우 포함
        if x1 == x2 && y1 == y2.negate() {
            return Ok(Self::infinity(self.curve));
        }

        let s = if x1 == x2 {
            // 점 배가: s = (3x² + a) / 2y
            x1.power(U256::from(2))
                .scale(U256::from(3))
                .add(&self.curve.a)?
                .divide(&y1.scale(U256::from(2)))?
        } else {
            y2.subtract(&y1)?.divide(&x2.subtract(&x1)?)?
        };

        let x3 = s.power(U256::from(2)).subtract(&x1)?.subtract(&x2)?;
        let y3 = s.multiply(&x1.subtract(&x3)?)?.subtract(&y1)?;

        Ok(Self::new_unchecked(x3, y3, self.curve))
    }

    /// 이진 double-and-add 로 `n * P`를 계산합니다.
    pub fn scalar_multiply(&self, n: U256) -> Result<Self, EccError> {
        let mut current = *self;
        let mut acc = Self::infinity(self.curve);

        for i in 0..n.bit_len() {
            if n.bit(i) {
                acc = acc.add(&current)?;
            }
            current = current.add(&current)?;
        }

        Ok(acc)
    }
}

impl fmt::Display for CurvePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.coords {
            Coordinates::Infinity => write!(f, "Point(infinity)"),
            Coordinates::Affine { x, y } => write!(f, "Point({}, {})", x, y),
        }
    }
}
