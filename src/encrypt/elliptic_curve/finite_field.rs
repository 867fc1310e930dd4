use std::fmt;

use ruint::aliases::U256;

use crate::EccError;

/// 소수 `prime`을 모듈러스로 하는 유한체 `F_prime`의 원소
///
/// 모든 연산은 새 값을 만들어 반환하며, 서로 다른 유한체의 원소끼리 연산하면
/// [`EccError::MismatchedField`]를 돌려줍니다.
///
/// ```rust
/// # use bitcoin_ecc::encrypt::FieldElement;
/// # use ruint::aliases::U256;
/// let prime = U256::from(23);
/// let a = FieldElement::new(U256::from(15), prime).unwrap();
/// let b = FieldElement::new(U256::from(10), prime).unwrap();
///
/// assert_eq!(a.add(&b).unwrap().num(), U256::from(2));   // (15 + 10) mod 23
/// assert_eq!(a.multiply(&b).unwrap().num(), U256::from(12)); // (15 * 10) mod 23
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldElement {
    num: U256,
    prime: U256,
}

impl FieldElement {
    pub fn new(num: U256, prime: U256) -> Result<Self, EccError> {
        if num >= prime {
            return Err(EccError::OutOfRange { value: num, prime });
        }

        Ok(Self { num, prime })
    }

    /// 범위 검사를 건너뛰는 생성자. 상수 정의처럼 `num < prime`이 이미 보장된 곳에서만 씁니다.
    pub(crate) const fn new_unchecked(num: U256, prime: U256) -> Self {
        Self { num, prime }
    }

    pub fn num(&self) -> U256 {
        self.num
    }

    pub fn prime(&self) -> U256 {
        self.prime
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub fn add(&self, rhs: &Self) -> Result<Self, EccError> {
        self.same_field(rhs)?;
        Ok(Self::new_unchecked(self.num.add_mod(rhs.num, self.prime), self.prime))
    }

    pub fn subtract(&self, rhs: &Self) -> Result<Self, EccError> {
        self.same_field(rhs)?;
        let num = if self.num >= rhs.num {
            self.num - rhs.num
        } else {
            self.prime - (rhs.num - self.num)
        };

        Ok(Self::new_unchecked(num, self.prime))
    }

    pub fn multiply(&self, rhs: &Self) -> Result<Self, EccError> {
        self.same_field(rhs)?;
        Ok(Self::new_unchecked(self.num.mul_mod(rhs.num, self.prime), self.prime))
    }

    pub fn divide(&self, rhs: &Self) -> Result<Self, EccError> {
        self.same_field(rhs)?;
        self.multiply(&rhs.inverse()?)
    }

    /// 덧셈 역원 `-a`
    pub fn negate(&self) -> Self {
        if self.num.is_zero() {
            *self
        } else {
            Self::new_unchecked(self.prime - self.num, self.prime)
        }
    }

    /// 유한체 원소가 아닌 정수 `k`와의 곱 `(num * k) mod prime`
    pub fn scale(&self, k: U256) -> Self {
        Self::new_unchecked(self.num.mul_mod(k, self.prime), self.prime)
    }

    /// 이진 거듭제곱법으로 `num^exponent mod prime`을 계산합니다.
    pub fn power(&self, exponent: U256) -> Self {
        let mut base = self.num;
        let mut res = U256::from(1) % self.prime;

        for i in 0..exponent.bit_len() {
            if exponent.bit(i) {
                res = res.mul_mod(base, self.prime);
            }
            base = base.mul_mod(base, self.prime);
        }

        Self::new_unchecked(res, self.prime)
    }

    /// 부호 있는 지수에 대한 거듭제곱
    ///
    /// 음수 지수는 페르마의 소정리(`a^(p-1) = 1`)를 이용해 `[0, p-1)` 범위로 옮긴 뒤 계산합니다.
    /// 0의 음수 거듭제곱은 정의되지 않으므로 [`EccError::NotInvertible`]입니다.
    pub fn power_signed(&self, exponent: i64) -> Result<Self, EccError> {
        if exponent >= 0 {
            return Ok(self.power(U256::from(exponent as u64)));
        }

        self.power_negative(U256::from(exponent.unsigned_abs()))
    }

    /// `self^(-magnitude)`
    ///
    /// `i64`에 담기지 않는 음수 지수용입니다.
    pub fn power_negative(&self, magnitude: U256) -> Result<Self, EccError> {
        if self.is_zero() {
            return Err(EccError::NotInvertible);
        }

        let order = self.prime - U256::from(1);
        let back = magnitude % order;
        let exponent = if back.is_zero() { back } else { order - back };

        Ok(self.power(exponent))
    }

    pub fn inverse(&self) -> Result<Self, EccError> {
        self.power_signed(-1)
    }

    fn same_field(&self, rhs: &Self) -> Result<(), EccError> {
        if self.prime != rhs.prime {
            return Err(EccError::MismatchedField { lhs: self.prime, rhs: rhs.prime });
        }

        Ok(())
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_hex(self.num))
    }
}

impl From<FieldElement> for U256 {
    fn from(value: FieldElement) -> Self {
        value.num
    }
}

/// 0으로 채운 64자리 소문자 16진수 문자열
pub fn to_hex(num: U256) -> String {
    hex::encode(num.to_be_bytes::<32>())
}
