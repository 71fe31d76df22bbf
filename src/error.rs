use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error(
        "the uploaded file is missing one or more required columns, please check spelling; \
         missing columns: {}",
        columns.join(", ")
    )]
    MissingColumns { columns: Vec<String> },

    #[error(
        "numeric fields must contain numbers and binary fields yes/no; \
         column '{column}' for student {student} holds '{value}': {detail}"
    )]
    BadValue {
        column: String,
        student: String,
        value: String,
        detail: String,
    },
}
