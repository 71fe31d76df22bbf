use serde::Serialize;

/// One uploaded table: the header row plus every data row, untyped.
/// Cells stay as text until the scoring engine reads them.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<csv::StringRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk 🟢",
            RiskLevel::Moderate => "Moderate Risk 🟠",
            RiskLevel::High => "High Risk 🔴",
            RiskLevel::Critical => "Critical Risk 🚨",
        }
    }
}

impl Serialize for RiskLevel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredStudent {
    pub student_number: String,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
}
