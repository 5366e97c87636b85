//! Per-byte carbon estimate using the Sustainable Web Design model (v3).
//!
//! Energy is derived from transferred data at a fixed kWh/GB rate, split
//! across the system segments and converted with the global average grid
//! intensity.

/// Energy used per gigabyte transferred
pub const KWH_PER_GB: f64 = 0.81;

/// Global average grid carbon intensity in gCO2e/kWh
pub const GLOBAL_GRID_INTENSITY: f64 = 442.0;

pub const CONSUMER_DEVICE_SHARE: f64 = 0.52;
pub const NETWORK_SHARE: f64 = 0.14;
pub const DATA_CENTER_SHARE: f64 = 0.15;
pub const PRODUCTION_SHARE: f64 = 0.19;

const BYTES_PER_GB: f64 = 1_000_000_000.0;

/// Emissions split across the parts of the system, in grams CO2e
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentEmissions {
    pub consumer_device: f64,
    pub network: f64,
    pub data_center: f64,
    pub production: f64,
}

impl SegmentEmissions {
    pub fn total(&self) -> f64 {
        self.consumer_device + self.network + self.data_center + self.production
    }
}

/// Emissions of each segment for a transfer of `bytes`
pub fn segments(bytes: u64) -> SegmentEmissions {
    let energy = bytes as f64 / BYTES_PER_GB * KWH_PER_GB;
    let grams = |share: f64| energy * share * GLOBAL_GRID_INTENSITY;
    SegmentEmissions {
        consumer_device: grams(CONSUMER_DEVICE_SHARE),
        network: grams(NETWORK_SHARE),
        data_center: grams(DATA_CENTER_SHARE),
        production: grams(PRODUCTION_SHARE),
    }
}

/// Estimated grams of CO2e for transferring `bytes`
pub fn per_byte(bytes: u64) -> f64 {
    segments(bytes).total()
}

/// Grams rounded to three decimals; non-finite values count as zero
pub fn format_grams(grams: f64) -> String {
    let grams = if grams.is_finite() { grams } else { 0.0 };
    format!("{:.3}", grams)
}

/// Rounded estimate for a transfer of `bytes`
pub fn estimate(bytes: u64) -> String {
    format_grams(per_byte(bytes))
}
