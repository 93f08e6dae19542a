//! PWM duty scaling between UI percentages and motor driver bytes.

/// Largest PWM duty value accepted by the motor drivers.
pub const MAX_DUTY: u8 = u8::MAX;

/// Round and clamp an arbitrary reading into a PWM duty byte.
///
/// Non-finite values map to `0`.
pub fn clamp_duty(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, f64::from(MAX_DUTY)) as u8
}

/// Convert a 0-100 percentage to a duty byte. Out-of-range input is clamped.
///
/// ```
/// use feeder_dashboard::command::pwm::percent_to_duty;
///
/// assert_eq!(percent_to_duty(50.0), 128);
/// assert_eq!(percent_to_duty(100.0), 255);
/// ```
pub fn percent_to_duty(percent: f64) -> u8 {
    if !percent.is_finite() {
        return 0;
    }
    clamp_duty(percent.clamp(0.0, 100.0) / 100.0 * f64::from(MAX_DUTY))
}

/// Convert a duty byte to a rounded 0-100 percentage.
pub fn duty_to_percent(duty: u8) -> u8 {
    (f64::from(duty) / f64::from(MAX_DUTY) * 100.0).round() as u8
}
