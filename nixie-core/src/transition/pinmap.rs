//! Digit to pin lookup

use nixie_hal::PinId;

use crate::config::{DisplayConfig, TubeWiring, MAX_TUBES};
use crate::error::DisplayError;

/// Wiring tables of the active tubes
///
/// `pin(tube, digit) = wiring[tube].pins[digit]`, with both indices checked.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMap {
    wiring: [TubeWiring; MAX_TUBES],
    active: u8,
}

impl PinMap {
    /// Build the map from a (validated) configuration
    pub fn new(config: &DisplayConfig) -> Self {
        Self {
            wiring: config.wiring,
            active: config.active.min(MAX_TUBES as u8),
        }
    }

    /// Number of tubes that can be looked up
    pub fn active(&self) -> u8 {
        self.active
    }

    /// Wiring table of an active tube
    pub fn wiring(&self, tube: u8) -> Result<&TubeWiring, DisplayError> {
        if tube >= self.active {
            return Err(DisplayError::InvalidTube(tube));
        }
        Ok(&self.wiring[tube as usize])
    }

    /// Pin lighting `digit` on active tube `tube`
    pub fn pin(&self, tube: u8, digit: u8) -> Result<PinId, DisplayError> {
        self.wiring(tube)?
            .pin(digit)
            .ok_or(DisplayError::InvalidDigit(digit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_tube_map() -> PinMap {
        let mut config = DisplayConfig::default();
        config.active = 3;
        config.wiring[1] = TubeWiring::new([15, 14, 13, 12, 11, 10, 27, 26, 25, 24]);
        PinMap::new(&config)
    }

    #[test]
    fn test_lookup() {
        let map = three_tube_map();
        assert_eq!(map.pin(0, 4), Ok(4));
        assert_eq!(map.pin(1, 0), Ok(15));
        assert_eq!(map.pin(1, 9), Ok(24));
        assert_eq!(map.pin(2, 7), Ok(27));
    }

    #[test]
    fn test_digit_out_of_range() {
        let map = three_tube_map();
        assert_eq!(map.pin(0, 10), Err(DisplayError::InvalidDigit(10)));
        assert_eq!(map.pin(0, 255), Err(DisplayError::InvalidDigit(255)));
    }

    #[test]
    fn test_tube_outside_active_window() {
        let map = three_tube_map();
        assert_eq!(map.active(), 3);
        assert_eq!(map.pin(3, 0), Err(DisplayError::InvalidTube(3)));
    }
}
