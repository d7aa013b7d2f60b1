//! Tick trigger descriptor: the market whose tick stream drives a job.
//!
//! The display form is `exchange/base/counter`, e.g. `binance/BTC/USDT`. The
//! same form is accepted by [`FromStr`] so the runner can take an instrument
//! on the command line.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OcoError;

/// Identifies the instrument whose ticks price and trigger a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickTrigger {
    pub exchange: String,
    pub base: String,
    pub counter: String,
}

impl TickTrigger {
    pub fn new(exchange: impl Into<String>, base: impl Into<String>, counter: impl Into<String>) -> Self {
        Self {
            exchange: exchange.into(),
            base: base.into(),
            counter: counter.into(),
        }
    }

    /// `BASE/COUNTER` without the exchange.
    pub fn pair(&self) -> String {
        format!("{}/{}", self.base, self.counter)
    }
}

impl std::fmt::Display for TickTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.exchange, self.base, self.counter)
    }
}

impl FromStr for TickTrigger {
    type Err = OcoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('/').map(str::trim).collect();
        match parts.as_slice() {
            [exchange, base, counter] if !exchange.is_empty() && !base.is_empty() && !counter.is_empty() => {
                Ok(Self::new(*exchange, *base, *counter))
            }
            _ => Err(OcoError::Instrument(format!("expected exchange/base/counter, got {s:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let t: TickTrigger = "binance/BTC/USD".parse().unwrap();
        assert_eq!(t, TickTrigger::new("binance", "BTC", "USD"));
        assert_eq!(t.to_string(), "binance/BTC/USD");
        assert_eq!(t.pair(), "BTC/USD");
    }

    #[test]
    fn parse_rejects_bad_shapes() {
        assert!("binance/BTC".parse::<TickTrigger>().is_err());
        assert!("binance//USD".parse::<TickTrigger>().is_err());
        assert!("a/b/c/d".parse::<TickTrigger>().is_err());
    }

    #[test]
    fn wire_fields() {
        let t = TickTrigger::new("kraken", "ETH", "EUR");
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v, serde_json::json!({"exchange": "kraken", "base": "ETH", "counter": "EUR"}));
    }
}
