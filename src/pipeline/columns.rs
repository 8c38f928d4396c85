//! Column names of the term metrics file and of the derived tables

pub const TERM: &str = "Term";
pub const YEAR: &str = "Year";
pub const APPLICATIONS: &str = "Applications";
pub const ADMITTED: &str = "Admitted";
pub const ENROLLED: &str = "Enrolled";
pub const RETENTION_RATE: &str = "Retention Rate (%)";
pub const SATISFACTION: &str = "Student Satisfaction (%)";

/// Suffix carried by every per-department enrollment column.
pub const DEPARTMENT_SUFFIX: &str = " Enrolled";

/// Department columns every input must carry; further `"<Department> Enrolled"`
/// columns may follow.
pub const KNOWN_DEPARTMENT_COLUMNS: [&str; 4] = [
    "Engineering Enrolled",
    "Business Enrolled",
    "Arts Enrolled",
    "Science Enrolled",
];

/// Admission funnel metrics, in chart order.
pub const FUNNEL_METRICS: [&str; 3] = [APPLICATIONS, ADMITTED, ENROLLED];

// Derived table columns
pub const DEPARTMENT: &str = "Department";
pub const ENROLLMENTS: &str = "Enrollments";
pub const METRIC: &str = "Metric";
pub const VALUE: &str = "Value";

pub const RETENTION_METRIC: &str = "Retention Rate";
pub const SATISFACTION_METRIC: &str = "Student Satisfaction";

/// Display label for a department column: `"Engineering Enrolled"` becomes `"Engineering"`.
///
/// Labels without the suffix are returned unchanged.
pub fn display_label(column: &str) -> &str {
    column
        .strip_suffix(DEPARTMENT_SUFFIX)
        .filter(|s| !s.is_empty())
        .unwrap_or(column)
}
