//! Partial string similarity used by the optional fuzzy pass

/// Best similarity (0-100) between the shorter string and any equal-length
/// window of the longer one
///
/// Similarity per window is normalized Levenshtein. Identical inputs, or a
/// needle that occurs verbatim in the haystack, score 100. Either side empty
/// scores 0.
///
/// # Examples
///
/// ```
/// use job_sift::skills::partial_ratio;
///
/// assert_eq!(partial_ratio("gazebo", "we simulate in gazebo daily"), 100.0);
/// assert!(partial_ratio("gazebo", "we simulate in gazeb0 daily") >= 80.0);
/// ```
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    if short.is_empty() {
        return 0.0;
    }

    if long.contains(short) {
        return 100.0;
    }

    let long_chars: Vec<char> = long.chars().collect();
    let width = short.chars().count();

    long_chars
        .windows(width)
        .map(|window| {
            let window: String = window.iter().collect();
            strsim::normalized_levenshtein(short, &window) * 100.0
        })
        .fold(0.0, f64::max)
}
