/// How a cluster's boundary becomes a `<path>` `d` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSimplifyMode {
    /// Decimated integer polyline, `M`/`L`/`Z` only.
    Polygon,
    /// Smoothed and cubic-Bezier-fitted, `M`/`C`/`Z`.
    Spline,
}

/// Whether clustering runs over full color or collapses to black/white first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Color,
    Binary,
}

/// Whether emitted layers keep their full pixel set (painter's-algorithm
/// overlap) or partition pixels so layers are disjoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hierarchical {
    Stacked,
    Cutout,
}

/// Vectorization parameters. Degree-valued fields are stored in degrees and
/// converted to radians once, at the point of use.
#[derive(Debug, Clone)]
pub struct Config {
    /// Minimum cluster area (in pixels) eligible to become its own output
    /// layer; `0` disables the size gate entirely (§ `isLargeEnough`).
    pub filter_speckle: u32,
    /// Color quantization precision, clamped to 1..=8 where it is read.
    pub color_precision: u8,
    /// Manhattan RGB distance a cluster must exceed its best neighbour by to
    /// be worth emitting as its own layer. `0` also enables diagonal
    /// neighbour connectivity during clustering.
    pub layer_difference: u32,
    /// Degrees; unsigned turning angle above which a polyline vertex is a
    /// preserved corner during smoothing.
    pub corner_threshold: f64,
    /// Pixels; edges at or below this length are not subdivided further.
    pub length_threshold: f64,
    /// Degrees; cumulative turning angle at which a new Bezier splice point
    /// is forced.
    pub splice_threshold: f64,
    /// Maximum smoothing passes.
    pub max_iterations: u32,
    /// Decimal places in emitted path coordinates.
    pub path_precision: usize,
    pub mode: PathSimplifyMode,
    pub color_mode: ColorMode,
    pub hierarchical: Hierarchical,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filter_speckle: 4,
            color_precision: 6,
            layer_difference: 16,
            corner_threshold: 60.0,
            length_threshold: 4.0,
            splice_threshold: 45.0,
            max_iterations: 10,
            path_precision: 2,
            mode: PathSimplifyMode::Spline,
            color_mode: ColorMode::Color,
            hierarchical: Hierarchical::Stacked,
        }
    }
}

impl Config {
    /// `8 - clamp(color_precision, 1, 8)`; two channel values are same-color
    /// iff they agree after being right-shifted by this amount.
    pub(crate) fn quantize_shift(&self) -> u32 {
        let precision = self.color_precision.clamp(1, 8);
        (8 - precision) as u32
    }

    pub(crate) fn corner_threshold_rad(&self) -> f64 {
        self.corner_threshold.to_radians()
    }

    pub(crate) fn splice_threshold_rad(&self) -> f64 {
        self.splice_threshold.to_radians()
    }

    /// `layer_difference == 0` enables diagonal-neighbour clustering.
    pub(crate) fn diagonal(&self) -> bool {
        self.layer_difference == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_spec_table() {
        let c = Config::default();
        assert_eq!(c.filter_speckle, 4);
        assert_eq!(c.color_precision, 6);
        assert_eq!(c.layer_difference, 16);
        assert_eq!(c.corner_threshold, 60.0);
        assert_eq!(c.length_threshold, 4.0);
        assert_eq!(c.splice_threshold, 45.0);
        assert_eq!(c.max_iterations, 10);
        assert_eq!(c.path_precision, 2);
        assert_eq!(c.mode, PathSimplifyMode::Spline);
        assert_eq!(c.color_mode, ColorMode::Color);
        assert_eq!(c.hierarchical, Hierarchical::Stacked);
    }

    #[test]
    fn quantize_shift_clamps_precision() {
        let mut c = Config::default();
        c.color_precision = 0;
        assert_eq!(c.quantize_shift(), 7);
        c.color_precision = 8;
        assert_eq!(c.quantize_shift(), 0);
        c.color_precision = 20;
        assert_eq!(c.quantize_shift(), 0);
        c.color_precision = 6;
        assert_eq!(c.quantize_shift(), 2);
    }

    #[test]
    fn diagonal_enabled_only_at_zero_layer_difference() {
        let mut c = Config::default();
        assert!(!c.diagonal());
        c.layer_difference = 0;
        assert!(c.diagonal());
    }
}
