//! Supported CAN bit rates and the controller timing behind each of them,
//! plus the parser for the textual request sent by the host at startup.

//==================================================================================BIT_TIMING
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Bit timing parameters of a TWAI/SJA1000-style controller clocked at 80 MHz.
///
/// One bit lasts `1 + tseg_1 + tseg_2` time quanta of `1 / quanta_resolution_hz`.
pub struct BitTiming {
    /// Time quantum frequency after the prescaler.
    pub quanta_resolution_hz: u32,
    /// Baud rate prescaler applied to the 80 MHz source clock.
    pub brp: u32,
    /// Time quanta before the sample point (propagation + phase 1).
    pub tseg_1: u8,
    /// Time quanta after the sample point (phase 2).
    pub tseg_2: u8,
    /// Synchronization jump width.
    pub sjw: u8,
    /// Sample each bit three times.
    pub triple_sampling: bool,
}

impl BitTiming {
    const fn new(quanta_resolution_hz: u32, brp: u32, tseg_1: u8, tseg_2: u8) -> Self {
        Self {
            quanta_resolution_hz,
            brp,
            tseg_1,
            tseg_2,
            sjw: 3,
            triple_sampling: false,
        }
    }

    /// Time quanta per bit.
    pub const fn quanta_per_bit(&self) -> u32 {
        1 + self.tseg_1 as u32 + self.tseg_2 as u32
    }

    /// Nominal bit rate produced by these parameters.
    pub const fn bit_rate(&self) -> u32 {
        self.quanta_resolution_hz / self.quanta_per_bit()
    }

    /// Sample point in per mille of the bit time.
    pub const fn sample_point_permille(&self) -> u32 {
        (1 + self.tseg_1 as u32) * 1000 / self.quanta_per_bit()
    }
}

//==================================================================================PRESET
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// One of the eight bus speeds the bridge can be configured for.
pub enum BitRatePreset {
    Rate1M,
    Rate800K,
    Rate500K,
    Rate250K,
    Rate125K,
    Rate100K,
    Rate50K,
    Rate25K,
}

impl Default for BitRatePreset {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl BitRatePreset {
    /// Preset used when the host asks for an unsupported rate.
    pub const FALLBACK: Self = Self::Rate250K;

    /// Every preset, fastest first.
    pub const ALL: [Self; 8] = [
        Self::Rate1M,
        Self::Rate800K,
        Self::Rate500K,
        Self::Rate250K,
        Self::Rate125K,
        Self::Rate100K,
        Self::Rate50K,
        Self::Rate25K,
    ];

    /// Exact-match lookup; `None` for unsupported rates.
    pub const fn from_bits_per_second(bps: u32) -> Option<Self> {
        match bps {
            1_000_000 => Some(Self::Rate1M),
            800_000 => Some(Self::Rate800K),
            500_000 => Some(Self::Rate500K),
            250_000 => Some(Self::Rate250K),
            125_000 => Some(Self::Rate125K),
            100_000 => Some(Self::Rate100K),
            50_000 => Some(Self::Rate50K),
            25_000 => Some(Self::Rate25K),
            _ => None,
        }
    }

    /// Preset selected for a host request. Unsupported or missing values fall
    /// back to 250 kbit/s without error.
    pub fn select(requested: Option<i64>) -> Self {
        requested
            .and_then(|bps| u32::try_from(bps).ok())
            .and_then(Self::from_bits_per_second)
            .unwrap_or(Self::FALLBACK)
    }

    pub const fn bits_per_second(&self) -> u32 {
        match self {
            Self::Rate1M => 1_000_000,
            Self::Rate800K => 800_000,
            Self::Rate500K => 500_000,
            Self::Rate250K => 250_000,
            Self::Rate125K => 125_000,
            Self::Rate100K => 100_000,
            Self::Rate50K => 50_000,
            Self::Rate25K => 25_000,
        }
    }

    /// Controller timing for this preset.
    pub const fn timing(&self) -> BitTiming {
        match self {
            Self::Rate1M => BitTiming::new(20_000_000, 4, 15, 4),
            Self::Rate800K => BitTiming::new(20_000_000, 4, 16, 8),
            Self::Rate500K => BitTiming::new(10_000_000, 8, 15, 4),
            Self::Rate250K => BitTiming::new(5_000_000, 16, 15, 4),
            Self::Rate125K => BitTiming::new(2_500_000, 32, 15, 4),
            Self::Rate100K => BitTiming::new(2_000_000, 40, 15, 4),
            Self::Rate50K => BitTiming::new(1_000_000, 80, 15, 4),
            Self::Rate25K => BitTiming::new(625_000, 128, 16, 8),
        }
    }
}

//==================================================================================REQUEST_PARSER
/// Parse an ASCII decimal bit-rate request.
///
/// Accepts leading whitespace, an optional sign, then digits up to the first
/// non-digit byte (the host terminates its request with `\n`). Only the bytes
/// actually received are inspected. Returns `None` when no digit is found or
/// the value overflows.
pub fn parse_bit_rate_request(bytes: &[u8]) -> Option<i64> {
    let mut rest = bytes;
    while let [b, tail @ ..] = rest {
        if !b.is_ascii_whitespace() {
            break;
        }
        rest = tail;
    }

    let negative = match rest {
        [b'-', tail @ ..] => {
            rest = tail;
            true
        }
        [b'+', tail @ ..] => {
            rest = tail;
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    let mut digits = 0usize;
    for b in rest.iter().take_while(|b| b.is_ascii_digit()) {
        value = value.checked_mul(10)?.checked_add((b - b'0') as i64)?;
        digits += 1;
    }

    if digits == 0 {
        return None;
    }
    Some(if negative { -value } else { value })
}
