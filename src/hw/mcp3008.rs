//! Driver for the Microchip MCP3008 8-channel, 10-bit ADC.

use std::convert::TryFrom;
use std::fmt;
use std::fmt::Display;

use crate::Result;

use super::hal::{BusGuard, SpiBus};

/// Number of single-ended input channels.
pub const CHANNELS: i32 = 8;

/// Largest code the converter produces.
pub const MAX_CODE: u16 = 1023;

/// Raw code reported for a reading that could not be taken.
pub const INVALID_CODE: i32 = -1;

const START_BIT: u8 = 0x01;
const SINGLE_ENDED: u8 = 0x08;

/// One reading from the converter.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Sample {
    /// A 10-bit conversion result.
    Valid(u16),
    /// No conversion took place (channel out of range).
    Invalid,
}

impl Sample {
    /// Returns the raw code, [`INVALID_CODE`] for an invalid sample.
    pub fn code(&self) -> i32 {
        match self {
            Sample::Valid(code) => *code as i32,
            Sample::Invalid => INVALID_CODE,
        }
    }

    /// Returns true if the sample carries a conversion result.
    pub fn is_valid(&self) -> bool {
        matches!(self, Sample::Valid(_))
    }
}

impl Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Sample::Valid(code) => write!(f, "{}", code),
            Sample::Invalid => write!(f, "invalid"),
        }
    }
}

/// Request frame selecting a single-ended conversion on `channel`.
///
/// Returns `None` for channels the converter does not have.
pub fn request_frame(channel: u8) -> Option<[u8; 3]> {
    if i32::from(channel) >= CHANNELS {
        return None;
    }
    Some([START_BIT, (SINGLE_ENDED | channel) << 4, 0x00])
}

/// Extract the 10-bit result from a response frame.
pub fn decode(response: &[u8; 3]) -> u16 {
    (((response[1] & 0x03) as u16) << 8) | (response[2] as u16)
}

/// MCP3008 attached to an SPI bus.
///
/// The driver owns the bus; dropping the driver releases it.
#[derive(Debug)]
pub struct Mcp3008<B: SpiBus> {
    bus: BusGuard<B>,
}

impl<B: SpiBus> Mcp3008<B> {
    /// Create a driver on an open bus.
    pub fn new(bus: B) -> Mcp3008<B> {
        Mcp3008 {
            bus: BusGuard::new(bus),
        }
    }

    /** Sample a single-ended channel.

    Channels outside `0..8` yield [`Sample::Invalid`] without touching the bus.
    Bus faults are returned as errors.
     */
    pub fn read_adc(&mut self, channel: i32) -> Result<Sample> {
        let request = match u8::try_from(channel).ok().and_then(request_frame) {
            Some(request) => request,
            None => return Ok(Sample::Invalid),
        };
        let mut response = [0u8; 3];
        self.bus.transfer(&request, &mut response)?;

        Ok(Sample::Valid(decode(&response)))
    }

    /// Release the underlying bus.
    pub fn release(&mut self) {
        self.bus.release();
    }

    /// Returns true once the underlying bus has been released.
    pub fn is_released(&self) -> bool {
        self.bus.is_released()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBus;

    #[test]
    fn out_of_range_channel_is_invalid() {
        let bus = MockBus::new();
        let probe = bus.probe();
        let mut adc = Mcp3008::new(bus);

        for channel in &[-100, -1, 8, 9, 255] {
            let sample = adc.read_adc(*channel).unwrap();
            assert_eq!(sample, Sample::Invalid);
            assert_eq!(sample.code(), -1);
        }
        assert_eq!(probe.transfers().len(), 0);
    }

    #[test]
    fn decodes_low_two_bits_of_second_byte() {
        let bus = MockBus::with_responses(&[[0, 1, 200], [0xff, 0xfe, 0x07]]);
        let mut adc = Mcp3008::new(bus);

        assert_eq!(adc.read_adc(0).unwrap(), Sample::Valid(456));
        assert_eq!(adc.read_adc(0).unwrap(), Sample::Valid((2 << 8) | 7));
    }

    #[test]
    fn sends_single_ended_request() {
        let bus = MockBus::with_responses(&[[0, 0, 0], [0, 0, 0]]);
        let probe = bus.probe();
        let mut adc = Mcp3008::new(bus);

        adc.read_adc(0).unwrap();
        adc.read_adc(7).unwrap();

        assert_eq!(probe.transfers(), vec![vec![0x01, 0x80, 0x00],
                                           vec![0x01, 0xf0, 0x00]]);
    }

    #[test]
    fn bus_fault_propagates() {
        let mut adc = Mcp3008::new(MockBus::failing());
        assert!(adc.read_adc(3).is_err());
    }

    #[test]
    fn frames_only_existing_channels() {
        assert_eq!(request_frame(3), Some([0x01, 0xb0, 0x00]));
        assert_eq!(request_frame(8), None);
        assert_eq!(request_frame(250), None);
    }

    #[test]
    fn sample_reports_validity() {
        assert!(Sample::Valid(0).is_valid());
        assert!(!Sample::Invalid.is_valid());
        assert_eq!(Sample::Valid(456).to_string(), "456");
        assert_eq!(Sample::Invalid.to_string(), "invalid");
    }

    #[test]
    fn release_is_reported() {
        let mut adc = Mcp3008::new(MockBus::new());
        assert!(!adc.is_released());
        adc.release();
        assert!(adc.is_released());
    }

    #[test]
    fn full_scale_decodes_to_max_code() {
        assert_eq!(decode(&[0, 0x03, 0xff]), MAX_CODE);
    }
}
