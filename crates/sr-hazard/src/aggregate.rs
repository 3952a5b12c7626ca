//! Down-sampling of a fine hazard field into coarser blocks.
//!
//! Each output cell covers a `ratio × ratio` block of input cells in the same
//! hour layer.  Blocks on the right/top edge may be partial when the input
//! extents are not multiples of `ratio`; they aggregate over the cells they
//! actually contain.

use sr_core::{Coordinate, HourLayer};

use crate::{HazardError, HazardField, HazardFieldBuilder, HazardResult};

/// How the cells of one block combine into a single intensity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Accumulation {
    /// Arithmetic mean of the block.
    #[default]
    Mean,
    /// Worst (largest) intensity in the block.
    Max,
}

impl std::str::FromStr for Accumulation {
    type Err = HazardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" => Ok(Accumulation::Mean),
            "max" => Ok(Accumulation::Max),
            other => Err(HazardError::Config(format!(
                "unknown accumulation {other:?}: expected \"mean\" or \"max\""
            ))),
        }
    }
}

/// Running aggregate for one block.
#[derive(Default)]
struct Block {
    value: f64,
    count: u32,
}

impl Block {
    fn add(&mut self, v: f64, mode: Accumulation) {
        match mode {
            Accumulation::Mean => self.value += v,
            Accumulation::Max => self.value = self.value.max(v),
        }
        self.count += 1;
    }

    fn get(&self, mode: Accumulation) -> f64 {
        match mode {
            Accumulation::Mean if self.count > 0 => self.value / self.count as f64,
            _ => self.value,
        }
    }
}

/// Build a coarser field where each cell aggregates a `ratio × ratio` block.
///
/// The day id carries over unchanged.  `ratio == 1` returns an identical copy.
pub fn downsample(field: &HazardField, ratio: u32, mode: Accumulation) -> HazardResult<HazardField> {
    if ratio == 0 {
        return Err(HazardError::Config("block ratio must be at least 1".into()));
    }
    let bx_size = field.xsize().div_ceil(ratio);
    let by_size = field.ysize().div_ceil(ratio);

    let builder = HazardFieldBuilder::new(bx_size, by_size, field.hour_count())?;
    let mut builder = match field.day() {
        Some(d) => builder.day(d),
        None => builder,
    };

    for h in 0..field.hour_count() {
        let layer = HourLayer(h);
        let mut blocks: Vec<Block> = (0..bx_size as usize * by_size as usize)
            .map(|_| Block::default())
            .collect();

        for x in 0..field.xsize() {
            for y in 0..field.ysize() {
                let v = field.intensity_at(layer, Coordinate::new(x, y))?;
                let b = (x / ratio) as usize * by_size as usize + (y / ratio) as usize;
                blocks[b].add(v, mode);
            }
        }

        for (i, block) in blocks.iter().enumerate() {
            let coord = Coordinate::new(i as u32 / by_size, i as u32 % by_size);
            builder.set(layer, coord, block.get(mode))?;
        }
    }

    Ok(builder.build())
}
