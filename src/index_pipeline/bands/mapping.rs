//! Band-mapping policies
//!
//! Ordinary RGB cameras have no near-infrared channel, so the stock policy uses the
//! green channel as a stand-in. Sources with a real NIR band only need a different
//! mapping; nothing downstream of band extraction changes.

/// Chooses which decoded channels serve as the red and near-infrared bands.
pub trait BandMapping: Send + Sync {
    fn red_channel(&self) -> usize;

    fn nir_channel(&self) -> usize;

    fn describe(&self) -> String {
        format!("red=ch{}, nir=ch{}", self.red_channel(), self.nir_channel())
    }
}

/// Fixed channel indices, by default red from channel 0 and the NIR proxy from
/// channel 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelBandMapping {
    pub red: usize,
    pub nir: usize,
}

impl ChannelBandMapping {
    pub const fn new(red: usize, nir: usize) -> Self {
        Self { red, nir }
    }
}

impl Default for ChannelBandMapping {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl BandMapping for ChannelBandMapping {
    fn red_channel(&self) -> usize {
        self.red
    }

    fn nir_channel(&self) -> usize {
        self.nir
    }
}
