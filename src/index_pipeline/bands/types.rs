/// Red and near-infrared-proxy samples of one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandPair<T> {
    pub red: T,
    pub nir_proxy: T,
}
