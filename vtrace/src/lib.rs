//! Raster-to-SVG vectorization: color clustering, hierarchical region
//! merge, boundary tracing, and cubic-Bezier path fitting.
//!
//! The only public entry point is [`vtrace`]; everything else is exposed so
//! the CLI collaborator and the crate's own integration tests can exercise
//! individual pipeline stages, but the pipeline order and wiring live here.

pub mod bezier;
pub mod binary;
pub mod boundary;
pub mod cluster;
pub mod color;
pub mod config;
pub mod error;
pub mod geom;
pub mod merge;
pub mod owner;
mod path;
pub mod pixels;
pub mod simplify;
pub mod smooth;
pub mod svg;
pub mod unionfind;

pub use config::Config;
pub use error::VtraceError;

use svg::PathLayer;

/// Converts an RGBA pixel buffer into an SVG document of filled paths.
///
/// `pixels` is mutated in place by transparency keying (§4.1) and, in
/// binary color mode, luminance collapse (§4.2); callers that need the
/// original buffer preserved must pass a copy.
///
/// Degenerate inputs (zero dimensions, an entirely keyed-out image, a
/// cluster with no surviving pixels) produce valid but path-less SVG
/// rather than an error; the only fallible precondition is the buffer
/// length itself.
pub fn vtrace(
    pixels: &mut [u8],
    width: u32,
    height: u32,
    config: &Config,
) -> Result<String, VtraceError> {
    let expected = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected {
        return Err(VtraceError::BufferLength { expected, actual: pixels.len() });
    }
    if width == 0 || height == 0 {
        return Ok(svg::assemble_svg(width, height, &[]));
    }

    let key = if pixels::should_key(pixels, width, height) {
        let k = pixels::find_unused_color(pixels, width, height);
        pixels::apply_key_color(pixels, width, height, k);
        Some(k)
    } else {
        None
    };

    if config.color_mode == config::ColorMode::Binary {
        pixels::to_binary_mode(pixels, width, height);
    }

    let shift = config.quantize_shift();
    let diagonal = config.diagonal();
    let cluster::ClusteringResult { mut clusters, label } =
        cluster::build_clusters(pixels, width, height, shift, diagonal, key);

    if clusters.is_empty() {
        return Ok(svg::assemble_svg(width, height, &[]));
    }

    let mut adjacency = cluster::build_adjacency(&label, width, height, clusters.len());
    let merge_result = merge::hierarchical_merge(
        &mut clusters,
        &mut adjacency,
        config.filter_speckle,
        config.layer_difference,
        width,
        height,
        key.is_some(),
    );

    let owners = owner::assign_pixels(
        &label,
        width,
        height,
        &merge_result.merged_into,
        &merge_result.emitted,
        config.hierarchical,
    );

    let mut layers = Vec::with_capacity(merge_result.emitted.len());
    for idx in &merge_result.emitted {
        let c = clusters.get(*idx);
        let color = c.residue_color();
        let rect = c.rect;
        let owning = owners.get(idx).map(Vec::as_slice).unwrap_or(&[]);
        let subpaths = path::build_compound_path(owning, rect, config);
        layers.push(PathLayer { color, subpaths });
    }

    Ok(svg::assemble_svg(width, height, &layers))
}
