use validator::ValidateEmail;

const EARTH_RADIUS_KM: f64 = 6371.0;

pub fn validate_email(email: &str) -> bool {
    email.validate_email()
}

pub fn validate_coordinates(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

/// Great-circle distance in kilometers.
pub fn calculate_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * a.sqrt().asin() * EARTH_RADIUS_KM
}

/// Reduces a client-supplied file name to a safe basename.
///
/// Directory components are dropped, whitespace becomes `_`, and anything
/// outside `[A-Za-z0-9._-]` is removed. Leading dots cannot survive, so the
/// result never names a parent directory or hidden file.
pub fn sanitize_filename(filename: &str) -> String {
    let basename = filename.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = basename
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com"));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("@example.com"));
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(19.07, 72.87));
        assert!(!validate_coordinates(91.0, 0.0));
        assert!(!validate_coordinates(0.0, -181.0));
    }

    #[test]
    fn test_distance_mumbai_to_pune() {
        let d = calculate_distance(19.0760, 72.8777, 18.5204, 73.8567);
        assert!((d - 120.0).abs() < 5.0, "got {}", d);
        assert_eq!(calculate_distance(10.0, 10.0, 10.0, 10.0), 0.0);
    }

    #[test]
    fn test_sanitize_filename_strips_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(sanitize_filename("my flood photo.jpg"), "my_flood_photo.jpg");
        assert_eq!(sanitize_filename("..."), "upload");
        assert_eq!(sanitize_filename(".hidden.png"), "hidden.png");
    }
}
