use std::fmt;

use ruint::aliases::U256;
use tracing::debug;

use super::k256::{G, N};
use super::{to_hex, FieldElement, S256Point};
use crate::{DerError, EccError};

const SEQUENCE: u8 = 0x30;
const INTEGER: u8 = 0x02;

/// ECDSA 서명 `(r, s)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    r: U256,
    s: U256,
}

impl Signature {
    pub fn new(r: U256, s: U256) -> Self {
        Self { r, s }
    }

    pub fn r(&self) -> U256 {
        self.r
    }

    pub fn s(&self) -> U256 {
        self.s
    }

    /// `r`, `s`가 모두 `[1, N)` 범위인지 확인합니다.
    pub fn check_range(&self) -> Result<(), EccError> {
        let in_range = |v: U256| !v.is_zero() && v < N;
        if !in_range(self.r) || !in_range(self.s) {
            return Err(EccError::InvalidSignatureRange);
        }

        Ok(())
    }

    pub fn to_der(&self) -> Vec<u8> {
        let r = der_integer(self.r);
        let s = der_integer(self.s);

        let mut der = Vec::with_capacity(2 + r.len() + s.len());
        der.push(SEQUENCE);
        der.push((r.len() + s.len()) as u8);
        der.extend_from_slice(&r);
        der.extend_from_slice(&s);

        der
    }

    pub fn parse_der(der: &[u8]) -> Result<Self, EccError> {
        let mut reader = DerReader { buf: der };

        reader.tag(SEQUENCE)?;
        let len = reader.byte()? as usize;
        if len != reader.buf.len() {
            return Err(DerError::Length.into());
        }

        let r = reader.integer()?;
        let s = reader.integer()?;
        if !reader.buf.is_empty() {
            return Err(DerError::Length.into());
        }

        Ok(Self::new(r, s))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}, {})", to_hex(self.r), to_hex(self.s))
    }
}

impl S256Point {
    /// 공개키 `self`로 다이제스트 `z`에 대한 서명을 검증합니다.
    ///
    /// `uG + vP = R` (u = z / s, v = r / s) 의 x 좌표가 `r`과 같으면 유효합니다.
    /// 범위를 벗어난 `r`, `s`나 무한원점이 나오는 경우는 모두 `false`입니다.
    pub fn verify(&self, z: U256, sig: &Signature) -> bool {
        if let Err(err) = sig.check_range() {
            debug!(%err, "rejecting signature");
            return false;
        }

        match self.combine(z, sig) {
            Ok(Some(rx)) => rx == sig.r,
            Ok(None) => {
                debug!("uG + vP is the point at infinity");
                false
            }
            Err(err) => {
                debug!(%err, "signature verification failed");
                false
            }
        }
    }

    /// `uG + vP`의 x 좌표를 `N`으로 줄인 값
    fn combine(&self, z: U256, sig: &Signature) -> Result<Option<U256>, EccError> {
        let z = FieldElement::new(z % N, N)?;
        let r = FieldElement::new(sig.r, N)?;
        let s_inv = FieldElement::new(sig.s, N)?.power(N - U256::from(2));

        let u = z.multiply(&s_inv)?;
        let v = r.multiply(&s_inv)?;
        let total = G.scalar_multiply(u.num())?.add(&self.scalar_multiply(v.num())?)?;

        Ok(total.x().map(|x| x.num() % N))
    }
}

/// 앞쪽 0 바이트를 걷어내고, 최상위 비트가 켜져 있으면 `0x00`을 덧붙인 DER 정수
fn der_integer(value: U256) -> Vec<u8> {
    let bytes: [u8; 32] = value.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(31);
    let body = &bytes[start..];

    let mut out = Vec::with_capacity(body.len() + 3);
    out.push(INTEGER);
    if body[0] & 0x80 != 0 {
        out.push(body.len() as u8 + 1);
        out.push(0);
    } else {
        out.push(body.len() as u8);
    }
    out.extend_from_slice(body);

    out
}

struct DerReader<'a> {
    buf: &'a [u8],
}

impl<'a> DerReader<'a> {
    fn byte(&mut self) -> Result<u8, DerError> {
        let (&first, rest) = self.buf.split_first().ok_or(DerError::Truncated)?;
        self.buf = rest;
        Ok(first)
    }

    fn tag(&mut self, expected: u8) -> Result<(), DerError> {
        let actual = self.byte()?;
        if actual != expected {
            return Err(DerError::Tag { expected, actual });
        }

        Ok(())
    }

    fn integer(&mut self) -> Result<U256, DerError> {
        self.tag(INTEGER)?;
        let len = self.byte()? as usize;
        if len == 0 {
            return Err(DerError::Length);
        }
        if len > 33 {
            return Err(DerError::IntegerTooLong);
        }
        if self.buf.len() < len {
            return Err(DerError::Truncated);
        }

        let (body, rest) = self.buf.split_at(len);
        self.buf = rest;

        // 0x00 은 다음 바이트의 최상위 비트가 켜져 있을 때만 허용
        let body = match body {
            [first, ..] if first & 0x80 != 0 => return Err(DerError::Negative),
            [0, next, ..] if next & 0x80 == 0 => return Err(DerError::NonCanonical),
            [0, tail @ ..] if !tail.is_empty() => tail,
            _ => body,
        };
        if body.len() > 32 {
            return Err(DerError::IntegerTooLong);
        }

        Ok(U256::from_be_slice(body))
    }
}
