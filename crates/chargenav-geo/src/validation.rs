use crate::models::Coordinate;

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }

    /// All error reasons joined into a single line
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.location, e.reason))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Validate a route path
pub fn validate_path(path: &[Coordinate]) -> ValidationResult {
    let mut result = ValidationResult::valid();

    // A drawable path needs at least 2 points
    if path.len() < 2 {
        result.add_error(
            "Path".to_string(),
            format!("Path must have at least 2 points, found {}", path.len()),
        );
        return result;
    }

    for (i, coord) in path.iter().enumerate() {
        if !coord.is_finite() {
            result.add_error(format!("Path[{}]", i), "Coordinates must be finite".to_string());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_path() {
        let path = vec![Coordinate::new(39.92, 32.85), Coordinate::new(39.93, 32.86)];
        let result = validate_path(&path);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_single_point_path() {
        let result = validate_path(&[Coordinate::new(39.92, 32.85)]);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.summary().contains("at least 2 points"));
    }

    #[test]
    fn test_non_finite_points_are_reported() {
        let path = vec![
            Coordinate::new(39.92, 32.85),
            Coordinate::new(f64::NAN, 32.86),
            Coordinate::new(39.94, f64::INFINITY),
        ];
        let result = validate_path(&path);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].location, "Path[1]");
    }
}
