use std::time::{Duration, Instant};

/// Progress in [0, 1] of an animation started at `start`
#[inline]
pub fn progress(start: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let ratio = start.elapsed().as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

#[inline]
pub fn is_complete(start: Instant, duration: Duration) -> bool {
    start.elapsed() >= duration
}

#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Interpolate scroll rows
#[inline]
pub fn lerp_u16(from: u16, to: u16, t: f64) -> u16 {
    lerp(from as f64, to as f64, t).round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_u16_both_directions() {
        assert_eq!(lerp_u16(0, 100, 0.5), 50);
        assert_eq!(lerp_u16(100, 0, 0.25), 75);
        assert_eq!(lerp_u16(40, 40, 0.7), 40);
    }

    #[test]
    fn test_progress_zero_duration() {
        assert!((progress(Instant::now(), Duration::ZERO) - 1.0).abs() < 0.001);
        assert!(is_complete(Instant::now(), Duration::ZERO));
    }
}
