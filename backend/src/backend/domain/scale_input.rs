//! Digit-entry buffer for the weight calculator.
//!
//! The operator keys the scale reading in digit by digit; there is no free
//! text parsing and no decimal point (whole grams only). The buffer is only
//! cleared after the store confirms a save, so a failed save leaves the
//! reading on screen for retry.

/// Standard empty-container weight in grams, subtracted from every scale
/// reading unless the entry overrides it.
pub const DEFAULT_CONTAINER_WEIGHT_G: f64 = 700.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ScaleInput {
    display: String,
    container_weight: f64,
}

impl Default for ScaleInput {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaleInput {
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            container_weight: DEFAULT_CONTAINER_WEIGHT_G,
        }
    }

    pub fn with_container_weight(container_weight: f64) -> Self {
        Self {
            display: "0".to_string(),
            container_weight,
        }
    }

    /// Append a digit to the display. A lone leading zero is replaced
    /// rather than extended, so pressing 5 on "0" yields "5".
    pub fn press_digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        if self.display == "0" {
            self.display = digit.to_string();
        } else {
            self.display.push((b'0' + digit) as char);
        }
    }

    /// Reset the buffer back to zero.
    pub fn clear(&mut self) {
        self.display = "0".to_string();
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// The gross weight currently keyed in, in grams.
    pub fn gross_weight(&self) -> f64 {
        self.display.parse().unwrap_or(0.0)
    }

    /// Net weight preview shown while typing; floored at zero so the
    /// display never goes negative below the container weight.
    pub fn net_preview(&self) -> f64 {
        (self.gross_weight() - self.container_weight).max(0.0)
    }

    /// A reading is savable only once it exceeds the container weight.
    pub fn is_savable(&self) -> bool {
        self.gross_weight() > self.container_weight
    }

    pub fn container_weight(&self) -> f64 {
        self.container_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_append_to_display() {
        let mut input = ScaleInput::new();
        input.press_digit(1);
        input.press_digit(2);
        input.press_digit(0);
        input.press_digit(0);
        assert_eq!(input.display(), "1200");
        assert_eq!(input.gross_weight(), 1200.0);
    }

    #[test]
    fn test_lone_leading_zero_is_replaced() {
        let mut input = ScaleInput::new();
        assert_eq!(input.display(), "0");
        input.press_digit(7);
        assert_eq!(input.display(), "7");
    }

    #[test]
    fn test_zero_after_digits_is_kept() {
        let mut input = ScaleInput::new();
        input.press_digit(9);
        input.press_digit(0);
        assert_eq!(input.display(), "90");
    }

    #[test]
    fn test_clear_resets_to_zero() {
        let mut input = ScaleInput::new();
        input.press_digit(8);
        input.press_digit(5);
        input.clear();
        assert_eq!(input.display(), "0");
        assert_eq!(input.gross_weight(), 0.0);
    }

    #[test]
    fn test_invalid_digit_is_ignored() {
        let mut input = ScaleInput::new();
        input.press_digit(4);
        input.press_digit(10);
        assert_eq!(input.display(), "4");
    }

    #[test]
    fn test_net_preview_floors_at_zero() {
        let mut input = ScaleInput::new();
        input.press_digit(5);
        input.press_digit(0);
        input.press_digit(0);
        // 500g is below the 700g container
        assert_eq!(input.net_preview(), 0.0);
        assert!(!input.is_savable());
    }

    #[test]
    fn test_exactly_container_weight_is_not_savable() {
        let mut input = ScaleInput::new();
        input.press_digit(7);
        input.press_digit(0);
        input.press_digit(0);
        assert_eq!(input.gross_weight(), DEFAULT_CONTAINER_WEIGHT_G);
        assert!(!input.is_savable());
        assert_eq!(input.net_preview(), 0.0);
    }

    #[test]
    fn test_above_container_weight_is_savable() {
        let mut input = ScaleInput::new();
        input.press_digit(1);
        input.press_digit(2);
        input.press_digit(0);
        input.press_digit(0);
        assert!(input.is_savable());
        assert_eq!(input.net_preview(), 500.0);
    }

    #[test]
    fn test_custom_container_weight() {
        let mut input = ScaleInput::with_container_weight(300.0);
        input.press_digit(4);
        input.press_digit(0);
        input.press_digit(0);
        assert!(input.is_savable());
        assert_eq!(input.net_preview(), 100.0);
    }
}
