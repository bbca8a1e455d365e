//! Serde helpers for float arrays that may contain `inf`/`-inf`/`NaN`.
//!
//! JSON has no literal for non-finite numbers (`serde_json` writes them as
//! `null`), and every bin-edge list starts and ends with an infinity. Finite
//! values stay JSON numbers; non-finite ones become the strings `"inf"`,
//! `"-inf"` and `"nan"`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Repr {
    Num(f64),
    Text(String),
}

fn encode(v: f64) -> Repr {
    if v.is_finite() {
        Repr::Num(v)
    } else if v.is_nan() {
        Repr::Text("nan".into())
    } else if v > 0.0 {
        Repr::Text("inf".into())
    } else {
        Repr::Text("-inf".into())
    }
}

fn decode<E: serde::de::Error>(r: Repr) -> Result<f64, E> {
    match r {
        Repr::Num(v) => Ok(v),
        Repr::Text(s) => match s.as_str() {
            "inf" | "+inf" => Ok(f64::INFINITY),
            "-inf" => Ok(f64::NEG_INFINITY),
            "nan" => Ok(f64::NAN),
            other => Err(E::custom(format!("invalid float literal '{other}'"))),
        },
    }
}

/// `#[serde(with = "float::vec")]` for `Vec<f64>`.
pub mod vec {
    use super::*;

    pub fn serialize<S: Serializer>(values: &[f64], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(values.iter().map(|&v| encode(v)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<f64>, D::Error> {
        let raw = Vec::<Repr>::deserialize(d)?;
        raw.into_iter().map(decode::<D::Error>).collect()
    }
}

/// `#[serde(with = "float::nested")]` for `Vec<Vec<f64>>`.
pub mod nested {
    use super::*;

    pub fn serialize<S: Serializer>(values: &[Vec<f64>], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(values.iter().map(|row| row.iter().map(|&v| encode(v)).collect::<Vec<_>>()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Vec<f64>>, D::Error> {
        let raw = Vec::<Vec<Repr>>::deserialize(d)?;
        raw.into_iter().map(|row| row.into_iter().map(decode::<D::Error>).collect()).collect()
    }
}
