use csv::StringRecord;

use crate::dataset::ColumnIndex;
use crate::error::EvalError;
use crate::models::{Dataset, RiskLevel, ScoredStudent};
use crate::schema::{self, Direction, FactorDef, FactorKind, FACTORS};

/// Turn a yes/no cell into a {0,1} risk indicator. Anything unreadable
/// takes the direction's lenient default instead of failing the row.
pub fn normalize_binary(raw: &str, direction: Direction) -> f64 {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" => direction.indicator(true),
        "no" => direction.indicator(false),
        _ => direction.lenient_default(),
    }
}

fn clip(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

fn numeric_cell(raw: &str, factor: &FactorDef, student: &str) -> Result<f64, EvalError> {
    raw.trim().parse::<f64>().map_err(|err| EvalError::BadValue {
        column: factor.column.to_string(),
        student: student.to_string(),
        value: raw.to_string(),
        detail: err.to_string(),
    })
}

/// One factor's weighted contribution for one row.
pub fn subscore(factor: &FactorDef, raw: &str, student: &str) -> Result<f64, EvalError> {
    let base = match factor.kind {
        FactorKind::Deficit { baseline, cap } => {
            clip(baseline - numeric_cell(raw, factor, student)?, 0.0, cap)
        }
        FactorKind::Excess { baseline } => {
            (numeric_cell(raw, factor, student)? - baseline).max(0.0)
        }
        FactorKind::Linear => numeric_cell(raw, factor, student)?,
        FactorKind::CappedLinear { cap } => numeric_cell(raw, factor, student)?.min(cap),
        FactorKind::Binary(direction) => normalize_binary(raw, direction),
    };
    Ok(base * factor.weight)
}

pub fn risk_level(score: f64) -> RiskLevel {
    if score >= 50.0 {
        RiskLevel::Critical
    } else if score >= 30.0 {
        RiskLevel::High
    } else if score >= 15.0 {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

/// Score one row. Pure: the same cells always produce the same result.
pub fn score_row(row: &StringRecord, columns: &ColumnIndex) -> Result<ScoredStudent, EvalError> {
    let student = row
        .get(columns[schema::STUDENT_NUMBER])
        .unwrap_or("")
        .to_string();

    let mut total = 0.0;
    for factor in FACTORS.iter() {
        let raw = row.get(columns[factor.column]).unwrap_or("");
        total += subscore(factor, raw, &student)?;
    }

    Ok(ScoredStudent {
        student_number: student,
        risk_score: total,
        risk_level: risk_level(total),
    })
}

/// Score every row in upload order. The first bad cell aborts the run;
/// no partial result is returned.
pub fn score_dataset(
    dataset: &Dataset,
    columns: &ColumnIndex,
) -> Result<Vec<ScoredStudent>, EvalError> {
    dataset
        .rows
        .iter()
        .map(|row| score_row(row, columns))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_index() -> ColumnIndex {
        schema::REQUIRED_COLUMNS
            .iter()
            .enumerate()
            .map(|(position, name)| (*name, position))
            .collect()
    }

    /// A row that contributes nothing to the risk score.
    fn zero_risk_cells() -> Vec<(&'static str, &'static str)> {
        vec![
            ("Student number", "S-001"),
            ("Hours_Sleep", "8"),
            ("Social_Support_Score", "5"),
            ("Academic_Pressure", "0"),
            ("Symptoms_Frequency", "0"),
            ("CGPA", "4.0"),
            ("Year_of_Study", "2"),
            ("Interested_in_Course", "no"),
            ("Family_Pressure", "no"),
            ("Career_Pressure", "no"),
            ("Experienced_Trauma", "no"),
            ("Someone_to_Talk_To", "yes"),
            ("Sleep_Quality_Rating", "5"),
            ("Screen_Time_Hours", "7"),
            ("Sought_Professional_Help", "no"),
            ("Overwhelmed_by_Studies", "no"),
            ("Anxious_in_Social_Situations", "no"),
            ("Physical_Exercise_Frequency", "5"),
            ("Close_Friends_Count", "5"),
            ("Motivated_about_Prospects", "no"),
            ("Daily_Energy_Levels", "5"),
            ("Knows_Healthy_Coping", "no"),
            ("Skip_Meals_Irregularly", "no"),
            ("Alcohol_Drinks_Weekly", "0"),
            ("Recreational_Drugs_Use", "no"),
            ("Difficulty_Controlling_Anger", "0"),
            ("Academic_Satisfaction", "5"),
        ]
    }

    fn row_with(overrides: &[(&'static str, &'static str)]) -> StringRecord {
        let mut cells = zero_risk_cells();
        for &(name, value) in overrides {
            let slot = cells
                .iter_mut()
                .find(|(cell_name, _)| *cell_name == name)
                .expect("unknown column in override");
            slot.1 = value;
        }
        let index = full_index();
        let mut ordered = vec![""; cells.len()];
        for &(name, value) in &cells {
            ordered[index[name]] = value;
        }
        StringRecord::from(ordered)
    }

    #[test]
    fn zero_risk_row_scores_zero() {
        let columns = full_index();
        let scored = score_row(&row_with(&[]), &columns).unwrap();
        assert_eq!(scored.risk_score, 0.0);
        assert_eq!(scored.risk_level, RiskLevel::Low);
        assert_eq!(scored.student_number, "S-001");
    }

    #[test]
    fn binary_normalization_is_case_and_whitespace_insensitive() {
        for raw in ["Yes", "yes", "YES ", " yEs"] {
            assert_eq!(normalize_binary(raw, Direction::Risk), 1.0);
            assert_eq!(normalize_binary(raw, Direction::Reverse), 0.0);
        }
        for raw in ["No", "no", " NO"] {
            assert_eq!(normalize_binary(raw, Direction::Risk), 0.0);
            assert_eq!(normalize_binary(raw, Direction::Reverse), 1.0);
        }
    }

    #[test]
    fn garbage_binary_defaults_to_the_non_risk_end() {
        for raw in ["", "maybe", "1", "y"] {
            assert_eq!(normalize_binary(raw, Direction::Risk), 0.0);
            assert_eq!(normalize_binary(raw, Direction::Reverse), 1.0);
        }
    }

    #[test]
    fn sleep_deficit_clips_at_both_ends() {
        let columns = full_index();
        // Plenty of sleep: 8 - 10 clips to zero, never negative.
        let rested = score_row(&row_with(&[("Hours_Sleep", "10")]), &columns).unwrap();
        assert_eq!(rested.risk_score, 0.0);
        // Two hours: deficit 6 clips to 4, weighted by 1.5.
        let deprived = score_row(&row_with(&[("Hours_Sleep", "2")]), &columns).unwrap();
        assert!((deprived.risk_score - 6.0).abs() < 1e-9);
    }

    #[test]
    fn screen_time_only_counts_the_excess() {
        let columns = full_index();
        let low = score_row(&row_with(&[("Screen_Time_Hours", "3")]), &columns).unwrap();
        assert_eq!(low.risk_score, 0.0);
        let high = score_row(&row_with(&[("Screen_Time_Hours", "11")]), &columns).unwrap();
        assert!((high.risk_score - 2.0).abs() < 1e-9); // (11 - 7) * 0.5
    }

    #[test]
    fn alcohol_contribution_caps_at_fifteen_drinks() {
        let columns = full_index();
        let heavy = score_row(&row_with(&[("Alcohol_Drinks_Weekly", "40")]), &columns).unwrap();
        assert!((heavy.risk_score - 10.5).abs() < 1e-9); // min(40, 15) * 0.7
    }

    #[test]
    fn dissatisfaction_has_no_upper_clip() {
        let columns = full_index();
        let row = row_with(&[("Academic_Satisfaction", "-10")]);
        let scored = score_row(&row, &columns).unwrap();
        assert!((scored.risk_score - 15.0).abs() < 1e-9); // (5 - -10) * 1.0
    }

    #[test]
    fn thresholds_are_closed_above_open_below() {
        assert_eq!(risk_level(50.0), RiskLevel::Critical);
        assert_eq!(risk_level(49.999), RiskLevel::High);
        assert_eq!(risk_level(30.0), RiskLevel::High);
        assert_eq!(risk_level(29.999), RiskLevel::Moderate);
        assert_eq!(risk_level(15.0), RiskLevel::Moderate);
        assert_eq!(risk_level(14.999), RiskLevel::Low);
        assert_eq!(risk_level(0.0), RiskLevel::Low);
    }

    #[test]
    fn identical_rows_score_identically() {
        let columns = full_index();
        let overrides = [("Hours_Sleep", "3"), ("Experienced_Trauma", "yes")];
        let first = score_row(&row_with(&overrides), &columns).unwrap();
        let second = score_row(&row_with(&overrides), &columns).unwrap();
        assert_eq!(first.risk_score, second.risk_score);
        assert_eq!(first.risk_level, second.risk_level);
    }

    #[test]
    fn tracked_unscored_fields_do_not_move_the_score() {
        let columns = full_index();
        let scored = score_row(
            &row_with(&[
                ("Sought_Professional_Help", "yes"),
                ("Interested_in_Course", "yes"),
            ]),
            &columns,
        )
        .unwrap();
        assert_eq!(scored.risk_score, 0.0);
    }

    #[test]
    fn missing_support_contact_adds_risk() {
        let columns = full_index();
        let scored = score_row(&row_with(&[("Someone_to_Talk_To", "no")]), &columns).unwrap();
        assert!((scored.risk_score - 1.5).abs() < 1e-9);
        // An unreadable answer on the reverse-direction field takes the same
        // lenient value as an explicit "no" read.
        let blank = score_row(&row_with(&[("Someone_to_Talk_To", "???")]), &columns).unwrap();
        assert_eq!(blank.risk_score, scored.risk_score);
    }

    #[test]
    fn worked_example_totals_and_classifies() {
        let columns = full_index();
        let row = row_with(&[
            ("Hours_Sleep", "4"),
            ("Sleep_Quality_Rating", "1"),
            ("Symptoms_Frequency", "5"),
            ("Experienced_Trauma", "yes"),
            ("Recreational_Drugs_Use", "yes"),
            ("CGPA", "2.0"),
            ("Alcohol_Drinks_Weekly", "20"),
        ]);
        let scored = score_row(&row, &columns).unwrap();
        // 6.0 sleep + 8.0 quality + 15.0 symptoms + 5.0 trauma
        // + 8.0 drugs + 3.0 cgpa + 10.5 alcohol
        assert!((scored.risk_score - 55.5).abs() < 1e-9);
        assert_eq!(scored.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn non_numeric_cell_fails_with_column_and_student() {
        let columns = full_index();
        let result = score_row(&row_with(&[("CGPA", "four")]), &columns);
        match result {
            Err(EvalError::BadValue { column, student, value, .. }) => {
                assert_eq!(column, "CGPA");
                assert_eq!(student, "S-001");
                assert_eq!(value, "four");
            }
            other => panic!("expected BadValue, got {other:?}"),
        }
    }

    #[test]
    fn dataset_scoring_keeps_upload_order() {
        let columns = full_index();
        let first = row_with(&[("Student number", "S-1"), ("Symptoms_Frequency", "2")]);
        let second = row_with(&[("Student number", "S-2")]);
        let dataset = Dataset {
            headers: schema::REQUIRED_COLUMNS.iter().map(|n| n.to_string()).collect(),
            rows: vec![first, second],
        };
        let scored = score_dataset(&dataset, &columns).unwrap();
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].student_number, "S-1");
        assert!((scored[0].risk_score - 6.0).abs() < 1e-9);
        assert_eq!(scored[1].student_number, "S-2");
    }
}
