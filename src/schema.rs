use std::collections::HashSet;

pub const STUDENT_NUMBER: &str = "Student number";

/// Every column the uploaded file must contain, scored or not.
pub const REQUIRED_COLUMNS: [&str; 27] = [
    "Student number",
    "Hours_Sleep",
    "Social_Support_Score",
    "Academic_Pressure",
    "Symptoms_Frequency",
    "CGPA",
    "Year_of_Study",
    "Interested_in_Course",
    "Family_Pressure",
    "Career_Pressure",
    "Experienced_Trauma",
    "Someone_to_Talk_To",
    "Sleep_Quality_Rating",
    "Screen_Time_Hours",
    "Sought_Professional_Help",
    "Overwhelmed_by_Studies",
    "Anxious_in_Social_Situations",
    "Physical_Exercise_Frequency",
    "Close_Friends_Count",
    "Motivated_about_Prospects",
    "Daily_Energy_Levels",
    "Knows_Healthy_Coping",
    "Skip_Meals_Irregularly",
    "Alcohol_Drinks_Weekly",
    "Recreational_Drugs_Use",
    "Difficulty_Controlling_Anger",
    "Academic_Satisfaction",
];

pub fn required_column_set() -> HashSet<&'static str> {
    REQUIRED_COLUMNS.iter().copied().collect()
}

/// Whether an affirmative answer raises or lowers the risk indicator.
///
/// The lenient default for unreadable text is always the non-risk end of
/// the scale, so bad input never inflates a student's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Risk,
    Reverse,
}

impl Direction {
    pub fn indicator(self, answered_yes: bool) -> f64 {
        match (self, answered_yes) {
            (Direction::Risk, true) | (Direction::Reverse, false) => 1.0,
            (Direction::Risk, false) | (Direction::Reverse, true) => 0.0,
        }
    }

    pub fn lenient_default(self) -> f64 {
        match self {
            Direction::Risk => 0.0,
            Direction::Reverse => 1.0,
        }
    }
}

/// Formula shape for one factor. Numeric shapes read an f64 cell; Binary
/// reads a yes/no cell through the normalizer.
#[derive(Debug, Clone, Copy)]
pub enum FactorKind {
    /// clip(baseline - value, 0, cap), cap may be infinite
    Deficit { baseline: f64, cap: f64 },
    /// max(value - baseline, 0)
    Excess { baseline: f64 },
    /// raw value
    Linear,
    /// min(value, cap)
    CappedLinear { cap: f64 },
    Binary(Direction),
}

#[derive(Debug, Clone, Copy)]
pub struct FactorDef {
    pub name: &'static str,
    pub column: &'static str,
    pub kind: FactorKind,
    pub weight: f64,
}

const INF: f64 = f64::INFINITY;

/// The whole scoring model as data. Validator, normalizer, and calculator
/// all consume this table; column names are never repeated inline.
///
/// Weight-zero entries are normalized and tracked but contribute nothing.
pub const FACTORS: [FactorDef; 25] = [
    FactorDef {
        name: "Sleep_Hours",
        column: "Hours_Sleep",
        kind: FactorKind::Deficit { baseline: 8.0, cap: 4.0 },
        weight: 1.5,
    },
    FactorDef {
        name: "Sleep_Quality",
        column: "Sleep_Quality_Rating",
        kind: FactorKind::Deficit { baseline: 5.0, cap: 4.0 },
        weight: 2.0,
    },
    FactorDef {
        name: "Symptoms",
        column: "Symptoms_Frequency",
        kind: FactorKind::Linear,
        weight: 3.0,
    },
    FactorDef {
        name: "Support_Score",
        column: "Social_Support_Score",
        kind: FactorKind::Deficit { baseline: 5.0, cap: 4.0 },
        weight: 1.5,
    },
    FactorDef {
        name: "Friends",
        column: "Close_Friends_Count",
        kind: FactorKind::Deficit { baseline: 5.0, cap: 5.0 },
        weight: 1.0,
    },
    FactorDef {
        name: "Energy",
        column: "Daily_Energy_Levels",
        kind: FactorKind::Deficit { baseline: 5.0, cap: 4.0 },
        weight: 1.5,
    },
    FactorDef {
        name: "Pressure_Academic",
        column: "Academic_Pressure",
        kind: FactorKind::Linear,
        weight: 1.5,
    },
    FactorDef {
        name: "Pressure_Family",
        column: "Family_Pressure",
        kind: FactorKind::Binary(Direction::Risk),
        weight: 2.0,
    },
    FactorDef {
        name: "Pressure_Career",
        column: "Career_Pressure",
        kind: FactorKind::Binary(Direction::Risk),
        weight: 1.5,
    },
    FactorDef {
        name: "CGPA",
        column: "CGPA",
        kind: FactorKind::Deficit { baseline: 4.0, cap: 4.0 },
        weight: 1.5,
    },
    FactorDef {
        name: "Acad_Dissatisfaction",
        column: "Academic_Satisfaction",
        kind: FactorKind::Deficit { baseline: 5.0, cap: INF },
        weight: 1.0,
    },
    FactorDef {
        name: "Overwhelmed",
        column: "Overwhelmed_by_Studies",
        kind: FactorKind::Binary(Direction::Risk),
        weight: 2.0,
    },
    FactorDef {
        name: "Trauma",
        column: "Experienced_Trauma",
        kind: FactorKind::Binary(Direction::Risk),
        weight: 5.0,
    },
    FactorDef {
        name: "Drugs",
        column: "Recreational_Drugs_Use",
        kind: FactorKind::Binary(Direction::Risk),
        weight: 8.0,
    },
    FactorDef {
        name: "Alcohol",
        column: "Alcohol_Drinks_Weekly",
        kind: FactorKind::CappedLinear { cap: 15.0 },
        weight: 0.7,
    },
    FactorDef {
        name: "Anger",
        column: "Difficulty_Controlling_Anger",
        kind: FactorKind::Linear,
        weight: 1.5,
    },
    FactorDef {
        name: "Screen_Time",
        column: "Screen_Time_Hours",
        kind: FactorKind::Excess { baseline: 7.0 },
        weight: 0.5,
    },
    FactorDef {
        name: "Exercise",
        column: "Physical_Exercise_Frequency",
        kind: FactorKind::Deficit { baseline: 5.0, cap: INF },
        weight: 1.0,
    },
    FactorDef {
        name: "Diet",
        column: "Skip_Meals_Irregularly",
        kind: FactorKind::Binary(Direction::Risk),
        weight: 1.5,
    },
    FactorDef {
        name: "Social_Anxiety",
        column: "Anxious_in_Social_Situations",
        kind: FactorKind::Binary(Direction::Risk),
        weight: 1.5,
    },
    FactorDef {
        name: "Coping",
        column: "Knows_Healthy_Coping",
        kind: FactorKind::Binary(Direction::Risk),
        weight: 2.0,
    },
    FactorDef {
        name: "Lack_Support",
        column: "Someone_to_Talk_To",
        kind: FactorKind::Binary(Direction::Reverse),
        weight: 1.5,
    },
    FactorDef {
        name: "Lack_Motivation",
        column: "Motivated_about_Prospects",
        kind: FactorKind::Binary(Direction::Risk),
        weight: 1.5,
    },
    // Tracked but unscored: normalized like any binary, weight zero.
    FactorDef {
        name: "Interest",
        column: "Interested_in_Course",
        kind: FactorKind::Binary(Direction::Risk),
        weight: 0.0,
    },
    FactorDef {
        name: "Help_Seeking",
        column: "Sought_Professional_Help",
        kind: FactorKind::Binary(Direction::Risk),
        weight: 0.0,
    },
];
