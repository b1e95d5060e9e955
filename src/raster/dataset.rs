//! Multi-band raster loaded from a TIFF/GeoTIFF file
//!
//! Opening a raster reads only its tags: size, band count, sample type, GDAL band
//! descriptions and nodata. Pixels are decoded one strip or tile at a time when a
//! single band is requested, so memory stays proportional to that band. Bands are
//! numbered from 1, matching GDAL and rasterio conventions.

use crate::io::error::VisualizationError;
use crate::raster::metadata::{GDAL_METADATA_TAG, GDAL_NODATA_TAG, GdalMetadata, parse_nodata};
use ndarray::Array2;
use num_traits::ToPrimitive;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

type TiffDecoder = Decoder<BufReader<File>>;

const PLANAR_SEPARATE: u32 = 2;

/// Numeric type of a band's samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleType {
    /// Unsigned 8-bit
    U8,
    /// Unsigned 16-bit
    U16,
    /// Unsigned 32-bit
    U32,
    /// Unsigned 64-bit
    U64,
    /// Signed 8-bit
    I8,
    /// Signed 16-bit
    I16,
    /// Signed 32-bit
    I32,
    /// Signed 64-bit
    I64,
    /// 32-bit float
    F32,
    /// 64-bit float
    F64,
}

impl SampleType {
    /// Conventional dtype name (`uint16`, `float32`, ...)
    pub const fn name(self) -> &'static str {
        match self {
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
            Self::U64 => "uint64",
            Self::I8 => "int8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::F32 => "float32",
            Self::F64 => "float64",
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the file says about one band, without its pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandInfo {
    /// 1-based band number
    pub index: usize,
    /// Sample type as stored in the file
    pub dtype: SampleType,
    /// Free-text description from the file's metadata
    pub description: Option<String>,
}

/// One spectral layer with its samples
#[derive(Debug, Clone)]
pub struct Band {
    /// 1-based band number
    pub index: usize,
    /// Sample type as stored in the file
    pub dtype: SampleType,
    /// Free-text description from the file's metadata
    pub description: Option<String>,
    /// Samples widened to `f64`, shape `(height, width)`
    pub data: Array2<f64>,
}

/// An opened multi-band raster
#[derive(Debug, Clone)]
pub struct Raster {
    path: PathBuf,
    width: u32,
    height: u32,
    nodata: Option<f64>,
    planar: bool,
    bands: Vec<BandInfo>,
}

impl Raster {
    /// Read the layout and band metadata of the TIFF at `path`
    ///
    /// Band descriptions and the nodata value are taken from GDAL's private tags
    /// when present. Only the first image directory is read.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened
    /// - The file is not a TIFF (JPEG 2000 is not)
    /// - The file declares no bands or a sample type that cannot be widened to `f64`
    pub fn open(path: &Path) -> Result<Self, VisualizationError> {
        let mut decoder = open_decoder(path)?;
        let (width, height) = decoder.dimensions().map_err(decode_error(path))?;
        let band_count = decoder.get_tag_u32(Tag::SamplesPerPixel).unwrap_or(1) as usize;
        if band_count == 0 {
            return Err(VisualizationError::NoBands {
                path: path.to_path_buf(),
            });
        }

        let dtype = sample_type(&mut decoder).map_err(|reason| VisualizationError::Layout {
            path: path.to_path_buf(),
            reason,
        })?;
        let planar = decoder
            .get_tag_u32(Tag::PlanarConfiguration)
            .is_ok_and(|config| config == PLANAR_SEPARATE);

        let metadata = decoder
            .get_tag_ascii_string(Tag::from_u16_exhaustive(GDAL_METADATA_TAG))
            .map(|xml| GdalMetadata::parse(&xml))
            .unwrap_or_default();
        let nodata = decoder
            .get_tag_ascii_string(Tag::from_u16_exhaustive(GDAL_NODATA_TAG))
            .ok()
            .and_then(|text| parse_nodata(&text));

        let bands = (1..=band_count)
            .map(|index| BandInfo {
                index,
                dtype,
                description: metadata.description(index).map(str::to_string),
            })
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
            nodata,
            planar,
            bands,
        })
    }

    /// Decode the samples of the 1-based band `index`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The band does not exist
    /// - A strip or tile fails to decode or exceeds the decoder's memory limits
    /// - A decoded strip or tile does not have the size its layout implies
    pub fn read_band(&self, index: usize) -> Result<Band, VisualizationError> {
        let layout_error = |reason: String| VisualizationError::Layout {
            path: self.path.clone(),
            reason,
        };
        let info = self.band(index).ok_or_else(|| {
            layout_error(format!(
                "band {index} is not present ({} band(s))",
                self.band_count()
            ))
        })?;

        let mut decoder = open_decoder(&self.path)?;
        let (chunk_w, chunk_h) = decoder.chunk_dimensions();
        if chunk_w == 0 || chunk_h == 0 {
            return Err(layout_error(format!(
                "zero-sized {chunk_w}x{chunk_h} strips or tiles"
            )));
        }
        let across = self.width.div_ceil(chunk_w);
        let down = self.height.div_ceil(chunk_h);

        // Separate planes store each band's chunks contiguously; interleaved
        // chunks hold every band for each pixel
        let band_offset = info.index - 1;
        let (first_chunk, stride, sample_offset) = if self.planar {
            (band_offset as u32 * across * down, 1, 0)
        } else {
            (0, self.band_count(), band_offset)
        };

        let mut data = Array2::from_elem((self.height as usize, self.width as usize), f64::NAN);
        for row in 0..down {
            for col in 0..across {
                let decoded = decoder
                    .read_chunk(first_chunk + row * across + col)
                    .map_err(decode_error(&self.path))?;
                let window = ChunkWindow {
                    top: (row * chunk_h) as usize,
                    left: (col * chunk_w) as usize,
                    width: chunk_w.min(self.width - col * chunk_w) as usize,
                    height: chunk_h.min(self.height - row * chunk_h) as usize,
                    padded_width: chunk_w as usize,
                    stride,
                    sample_offset,
                };
                window.scatter(&decoded, &mut data).map_err(layout_error)?;
            }
        }

        Ok(Band {
            index: info.index,
            dtype: info.dtype,
            description: info.description.clone(),
            data,
        })
    }

    /// Source file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of bands
    pub const fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// `(width, height)` in pixels
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Nodata marker, if the file declared one
    pub const fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    /// Metadata of every band in file order
    pub fn bands(&self) -> &[BandInfo] {
        &self.bands
    }

    /// Band metadata by 1-based number
    pub fn band(&self, index: usize) -> Option<&BandInfo> {
        index.checked_sub(1).and_then(|i| self.bands.get(i))
    }

    /// Per-band descriptions in file order
    pub fn descriptions(&self) -> Vec<Option<String>> {
        self.bands.iter().map(|b| b.description.clone()).collect()
    }
}

fn open_decoder(path: &Path) -> Result<TiffDecoder, VisualizationError> {
    let file = File::open(path).map_err(|source| VisualizationError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    // Default limits: an oversized strip or tile is a decode error, not an abort
    Decoder::new(BufReader::new(file)).map_err(decode_error(path))
}

fn decode_error(path: &Path) -> impl Fn(tiff::TiffError) -> VisualizationError + Copy + '_ {
    move |source| VisualizationError::Decode {
        path: path.to_path_buf(),
        source,
    }
}

fn first_tag_value(decoder: &mut TiffDecoder, tag: Tag) -> Option<u32> {
    decoder
        .get_tag_u32_vec(tag)
        .ok()
        .and_then(|values| values.first().copied())
}

fn sample_type(decoder: &mut TiffDecoder) -> Result<SampleType, String> {
    let bits = first_tag_value(decoder, Tag::BitsPerSample).unwrap_or(1);
    // 1 = unsigned, 2 = signed, 3 = IEEE float
    let format = first_tag_value(decoder, Tag::SampleFormat).unwrap_or(1);
    Ok(match (format, bits) {
        (1, 8) => SampleType::U8,
        (1, 16) => SampleType::U16,
        (1, 32) => SampleType::U32,
        (1, 64) => SampleType::U64,
        (2, 8) => SampleType::I8,
        (2, 16) => SampleType::I16,
        (2, 32) => SampleType::I32,
        (2, 64) => SampleType::I64,
        (3, 32) => SampleType::F32,
        (3, 64) => SampleType::F64,
        _ => {
            return Err(format!(
                "unsupported {bits}-bit samples with sample format {format}"
            ));
        }
    })
}

// Where one decoded strip or tile lands in the band
struct ChunkWindow {
    top: usize,
    left: usize,
    width: usize,
    height: usize,
    padded_width: usize,
    stride: usize,
    sample_offset: usize,
}

impl ChunkWindow {
    fn scatter(&self, decoded: &DecodingResult, data: &mut Array2<f64>) -> Result<(), String> {
        match decoded {
            DecodingResult::U8(s) => self.scatter_samples(s, data),
            DecodingResult::U16(s) => self.scatter_samples(s, data),
            DecodingResult::U32(s) => self.scatter_samples(s, data),
            DecodingResult::U64(s) => self.scatter_samples(s, data),
            DecodingResult::I8(s) => self.scatter_samples(s, data),
            DecodingResult::I16(s) => self.scatter_samples(s, data),
            DecodingResult::I32(s) => self.scatter_samples(s, data),
            DecodingResult::I64(s) => self.scatter_samples(s, data),
            DecodingResult::F32(s) => self.scatter_samples(s, data),
            DecodingResult::F64(s) => self.scatter_samples(s, data),
        }
    }

    // Edge chunks arrive either clipped to the image or padded to the full chunk width
    fn scatter_samples<T: ToPrimitive + Copy>(
        &self,
        samples: &[T],
        data: &mut Array2<f64>,
    ) -> Result<(), String> {
        let clipped = self.width * self.height * self.stride;
        let row_len = if samples.len() == clipped {
            self.width
        } else if samples.len() >= self.padded_width * self.height * self.stride {
            self.padded_width
        } else {
            return Err(format!(
                "expected {clipped} samples for a {}x{} chunk with {} sample(s) per pixel, decoded {}",
                self.width,
                self.height,
                self.stride,
                samples.len()
            ));
        };

        for r in 0..self.height {
            for c in 0..self.width {
                let value = samples
                    .get((r * row_len + c) * self.stride + self.sample_offset)
                    .and_then(ToPrimitive::to_f64)
                    .unwrap_or(f64::NAN);
                if let Some(cell) = data.get_mut((self.top + r, self.left + c)) {
                    *cell = value;
                }
            }
        }
        Ok(())
    }
}
