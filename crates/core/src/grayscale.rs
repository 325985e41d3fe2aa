//! Grayscale conversion over the image representations a host may pass.
//!
//! Three representations are accepted:
//!
//! - [`ImageBuffer::Native`]: a decoded [`image::DynamicImage`];
//! - [`ImageBuffer::Array`]: a channel-last sample array, `(H, W, C)` or
//!   batched `(B, H, W, C)`, holding `f32` in `[0, 1]` or `u8` in `[0, 255]`;
//! - [`ImageBuffer::Raw`]: any other value, coerced into a sample array
//!   when it is a rectangular nested list of numbers.
//!
//! Luminance is `0.299 R + 0.587 G + 0.114 B` over the first three channels.
//! Output always has a single channel; arrays keep their rank through an
//! explicit trailing channel axis of length 1. Inputs with fewer than three
//! channels are already gray and are returned untouched.
//!
//! Conversion never fails outward. When a buffer cannot be converted the
//! outcome is [`GrayscaleOutcome::Recovered`], carrying the original value
//! and the reason, and a warning is logged.

use image::{DynamicImage, Luma, Pixel};
use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn, Zip};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Red weight of the luminance transform (ITU-R BT.601).
pub const LUMA_R: f32 = 0.299;

/// Green weight of the luminance transform.
pub const LUMA_G: f32 = 0.587;

/// Blue weight of the luminance transform.
pub const LUMA_B: f32 = 0.114;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Channel-last numeric sample array.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleArray {
    /// Normalized samples in `[0, 1]`.
    F32(ArrayD<f32>),
    /// 8-bit samples in `[0, 255]`.
    U8(ArrayD<u8>),
}

impl SampleArray {
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::F32(a) => a.shape(),
            Self::U8(a) => a.shape(),
        }
    }

    pub fn dtype(&self) -> &'static str {
        match self {
            Self::F32(_) => "f32",
            Self::U8(_) => "u8",
        }
    }
}

/// An image in one of the supported in-memory representations.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageBuffer {
    Native(DynamicImage),
    Array(SampleArray),
    Raw(serde_json::Value),
}

impl ImageBuffer {
    /// Short name of the representation, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Native(_) => "native",
            Self::Array(_) => "array",
            Self::Raw(_) => "raw",
        }
    }
}

/// Why a buffer was passed through instead of converted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GrayscaleError {
    #[error("Unsupported array rank {0} (expected 2, 3 or 4)")]
    UnsupportedRank(usize),

    #[error("Channel axis is empty")]
    EmptyChannels,

    #[error("Unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),

    #[error("Cannot coerce value into a sample array: {0}")]
    Coercion(String),
}

/// Result of a grayscale conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum GrayscaleOutcome {
    /// The luminance transform was applied.
    Converted(ImageBuffer),
    /// The input had fewer than three channels and was left as is.
    AlreadyGray(ImageBuffer),
    /// The input could not be converted; `original` is returned verbatim.
    Recovered {
        original: ImageBuffer,
        error: GrayscaleError,
    },
}

impl GrayscaleOutcome {
    /// The buffer a node should hand back to its caller.
    pub fn into_image(self) -> ImageBuffer {
        match self {
            Self::Converted(image) | Self::AlreadyGray(image) => image,
            Self::Recovered { original, .. } => original,
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered { .. })
    }
}

/// Internal per-representation result before re-wrapping.
enum Step<T> {
    Unchanged,
    Converted(T),
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Convert `image` to single-channel luminance, preserving its
/// representation kind and sample type.
pub fn to_grayscale(image: ImageBuffer) -> GrayscaleOutcome {
    match image {
        ImageBuffer::Native(img) => match convert_native(&img) {
            Ok(Step::Converted(out)) => GrayscaleOutcome::Converted(ImageBuffer::Native(out)),
            Ok(Step::Unchanged) => GrayscaleOutcome::AlreadyGray(ImageBuffer::Native(img)),
            Err(error) => recovered(ImageBuffer::Native(img), error),
        },
        ImageBuffer::Array(arr) => match convert_array(&arr) {
            Ok(Step::Converted(out)) => GrayscaleOutcome::Converted(ImageBuffer::Array(out)),
            Ok(Step::Unchanged) => GrayscaleOutcome::AlreadyGray(ImageBuffer::Array(arr)),
            Err(error) => recovered(ImageBuffer::Array(arr), error),
        },
        ImageBuffer::Raw(value) => {
            let coerced = match coerce_raw(&value) {
                Ok(arr) => arr,
                Err(error) => return recovered(ImageBuffer::Raw(value), error),
            };
            match convert_array(&coerced) {
                Ok(Step::Converted(out)) => GrayscaleOutcome::Converted(ImageBuffer::Array(out)),
                Ok(Step::Unchanged) => GrayscaleOutcome::AlreadyGray(ImageBuffer::Raw(value)),
                Err(error) => recovered(ImageBuffer::Raw(value), error),
            }
        }
    }
}

fn recovered(original: ImageBuffer, error: GrayscaleError) -> GrayscaleOutcome {
    tracing::warn!(
        kind = original.kind(),
        error = %error,
        "Grayscale conversion failed, returning input unchanged",
    );
    GrayscaleOutcome::Recovered { original, error }
}

// ---------------------------------------------------------------------------
// Luminance
// ---------------------------------------------------------------------------

fn weighted(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

fn luma_unit(r: f32, g: f32, b: f32) -> f32 {
    weighted(r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)).clamp(0.0, 1.0)
}

fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    weighted(r as f32, g as f32, b as f32).round().clamp(0.0, 255.0) as u8
}

fn luma_u16(r: u16, g: u16, b: u16) -> u16 {
    weighted(r as f32, g as f32, b as f32)
        .round()
        .clamp(0.0, u16::MAX as f32) as u16
}

// ---------------------------------------------------------------------------
// Native images
// ---------------------------------------------------------------------------

fn convert_native(img: &DynamicImage) -> Result<Step<DynamicImage>, GrayscaleError> {
    let out = match img {
        DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_) => return Ok(Step::Unchanged),
        DynamicImage::ImageRgb8(buf) => DynamicImage::ImageLuma8(luma8_plane(buf)),
        DynamicImage::ImageRgba8(buf) => DynamicImage::ImageLuma8(luma8_plane(buf)),
        DynamicImage::ImageRgb16(buf) => DynamicImage::ImageLuma16(luma16_plane(buf)),
        DynamicImage::ImageRgba16(buf) => DynamicImage::ImageLuma16(luma16_plane(buf)),
        other => {
            return Err(GrayscaleError::UnsupportedPixelFormat(format!(
                "{:?}",
                other.color()
            )))
        }
    };
    Ok(Step::Converted(out))
}

fn luma8_plane<P>(src: &image::ImageBuffer<P, Vec<u8>>) -> image::GrayImage
where
    P: Pixel<Subpixel = u8>,
{
    image::GrayImage::from_fn(src.width(), src.height(), |x, y| {
        let c = src.get_pixel(x, y).channels();
        Luma([luma_u8(c[0], c[1], c[2])])
    })
}

fn luma16_plane<P>(src: &image::ImageBuffer<P, Vec<u16>>) -> image::ImageBuffer<Luma<u16>, Vec<u16>>
where
    P: Pixel<Subpixel = u16>,
{
    image::ImageBuffer::from_fn(src.width(), src.height(), |x, y| {
        let c = src.get_pixel(x, y).channels();
        Luma([luma_u16(c[0], c[1], c[2])])
    })
}

// ---------------------------------------------------------------------------
// Sample arrays
// ---------------------------------------------------------------------------

/// Check the layout and return the channel axis, or `None` when the array
/// is already a gray plane.
fn channel_axis(shape: &[usize]) -> Result<Option<Axis>, GrayscaleError> {
    match shape.len() {
        2 => Ok(None),
        3 | 4 => {
            let channels = shape[shape.len() - 1];
            if channels == 0 {
                Err(GrayscaleError::EmptyChannels)
            } else if channels < 3 {
                Ok(None)
            } else {
                Ok(Some(Axis(shape.len() - 1)))
            }
        }
        rank => Err(GrayscaleError::UnsupportedRank(rank)),
    }
}

fn convert_array(arr: &SampleArray) -> Result<Step<SampleArray>, GrayscaleError> {
    let Some(axis) = channel_axis(arr.shape())? else {
        return Ok(Step::Unchanged);
    };
    let out = match arr {
        SampleArray::F32(a) => SampleArray::F32(luma_array(a.view(), axis, luma_unit)),
        SampleArray::U8(a) => SampleArray::U8(luma_array(a.view(), axis, luma_u8)),
    };
    Ok(Step::Converted(out))
}

fn luma_array<T, F>(arr: ArrayViewD<'_, T>, axis: Axis, luma: F) -> ArrayD<T>
where
    T: Copy + Default,
    F: Fn(T, T, T) -> T,
{
    let r = arr.index_axis(axis, 0);
    let g = arr.index_axis(axis, 1);
    let b = arr.index_axis(axis, 2);
    let mut plane = ArrayD::from_elem(r.raw_dim(), T::default());
    Zip::from(&mut plane)
        .and(&r)
        .and(&g)
        .and(&b)
        .for_each(|out, &r, &g, &b| *out = luma(r, g, b));
    plane.insert_axis(axis)
}

// ---------------------------------------------------------------------------
// Raw coercion
// ---------------------------------------------------------------------------

/// Coerce a nested JSON list into a sample array.
///
/// Integer-only data within `0..=255` becomes `u8`, anything else `f32`.
fn coerce_raw(value: &serde_json::Value) -> Result<SampleArray, GrayscaleError> {
    let shape = infer_shape(value);
    let mut samples = Vec::new();
    flatten_into(value, &shape, &mut samples)?;

    let all_bytes = samples
        .iter()
        .all(|n| n.as_u64().is_some_and(|v| v <= u8::MAX as u64));

    let dim = IxDyn(&shape);
    let array = if all_bytes {
        let data = samples
            .iter()
            .filter_map(|n| n.as_u64())
            .map(|v| v as u8)
            .collect();
        SampleArray::U8(
            ArrayD::from_shape_vec(dim, data)
                .map_err(|e| GrayscaleError::Coercion(e.to_string()))?,
        )
    } else {
        let data = samples
            .iter()
            .map(|n| n.as_f64().unwrap_or(f64::NAN) as f32)
            .collect();
        SampleArray::F32(
            ArrayD::from_shape_vec(dim, data)
                .map_err(|e| GrayscaleError::Coercion(e.to_string()))?,
        )
    };
    Ok(array)
}

/// Shape implied by following the first element at every depth.
fn infer_shape(value: &serde_json::Value) -> Vec<usize> {
    let mut shape = Vec::new();
    let mut current = value;
    while let serde_json::Value::Array(items) = current {
        shape.push(items.len());
        match items.first() {
            Some(first) => current = first,
            None => break,
        }
    }
    shape
}

fn flatten_into<'a>(
    value: &'a serde_json::Value,
    shape: &[usize],
    out: &mut Vec<&'a serde_json::Number>,
) -> Result<(), GrayscaleError> {
    match (value, shape.split_first()) {
        (serde_json::Value::Number(n), None) => {
            out.push(n);
            Ok(())
        }
        (serde_json::Value::Array(items), Some((&len, rest))) => {
            if items.len() != len {
                return Err(GrayscaleError::Coercion(format!(
                    "ragged nesting: expected {len} elements, found {}",
                    items.len()
                )));
            }
            items.iter().try_for_each(|item| flatten_into(item, rest, out))
        }
        (serde_json::Value::Array(_), None) => Err(GrayscaleError::Coercion(
            "nesting deeper than the first element".into(),
        )),
        (other, _) => Err(GrayscaleError::Coercion(format!(
            "expected a number or list, found {}",
            json_type_name(other)
        ))),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
