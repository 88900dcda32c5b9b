use convert_case::{Boundary, Case, Casing};

/// Word boundaries of a field identifier: lowercase or digit followed by uppercase, the end of an
/// uppercase run followed by a capitalized word (acronyms stay whole), dashes and underscores.
const BOUNDARIES: [Boundary; 5] = [
    Boundary::LOWER_UPPER,
    Boundary::DIGIT_UPPER,
    Boundary::ACRONYM,
    Boundary::HYPHEN,
    Boundary::UNDERSCORE,
];

/// Infers a column name from a field identifier. Already snake_case input is returned unchanged.
///
/// ```rust
/// use tack_core::to_snake_case;
/// assert_eq!(to_snake_case("FourPointFive"), "four_point_five");
/// assert_eq!(to_snake_case("JobID"), "job_id");
/// assert_eq!(to_snake_case("ONETwo"), "one_two");
/// assert_eq!(to_snake_case("created_at"), "created_at");
/// ```
pub fn to_snake_case(name: &str) -> String {
    let name = name.strip_prefix("r#").unwrap_or(name);
    name.with_boundaries(&BOUNDARIES).to_case(Case::Snake)
}
