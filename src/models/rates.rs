use indexmap::IndexMap;
use serde::Serialize;

/// 币种汇率表 (币种代码区分大小写), 构建后只读
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: IndexMap<String, f64>,
}

impl RateTable {
    pub fn new(rates: IndexMap<String, f64>) -> Self {
        Self { rates }
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    /// from -> to 的换算系数; 任一币种未知时返回 None
    pub fn conversion_rate(&self, from: &str, to: &str) -> Option<f64> {
        let from_rate = self.get(from)?;
        let to_rate = self.get(to)?;
        Some(from_rate / to_rate)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
