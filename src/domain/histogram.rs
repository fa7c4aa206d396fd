use std::num::NonZeroUsize;

/// Distribution of rents over equal-width bins.
#[derive(Debug, Clone, PartialEq)]
pub struct RentHistogram {
    lower: f64,
    width: f64,
    counts: Vec<usize>,
}

/// A single histogram bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Upper edge. Exclusive, except for the last bin.
    pub upper: f64,
    /// Number of rents falling in the bin.
    pub count: usize,
}

impl RentHistogram {
    /// Bucket the given rents into `bins` equal-width bins spanning the
    /// observed range.
    ///
    /// When every rent is equal the range is widened to one unit centred on
    /// that value. No rents gives a histogram with no bins.
    pub fn new(rents: impl IntoIterator<Item = f64>, bins: NonZeroUsize) -> Self {
        let rents: Vec<f64> = rents.into_iter().collect();
        let bins = bins.get();

        let Some((min, max)) = rents.iter().fold(None, |range, &rent| match range {
            None => Some((rent, rent)),
            Some((min, max)) => Some((f64::min(min, rent), f64::max(max, rent))),
        }) else {
            return Self {
                lower: 0.0,
                width: 0.0,
                counts: Vec::new(),
            };
        };

        let (lower, upper) = if max > min {
            (min, max)
        } else {
            (min - 0.5, max + 0.5)
        };
        #[allow(clippy::cast_precision_loss)]
        let width = (upper - lower) / bins as f64;

        let mut counts = vec![0; bins];
        for rent in rents {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let index = (((rent - lower) / width) as usize).min(bins - 1);
            counts[index] += 1;
        }

        Self {
            lower,
            width,
            counts,
        }
    }

    /// Iterate over the bins, lowest first.
    pub fn bins(&self) -> impl Iterator<Item = Bin> + '_ {
        self.counts.iter().enumerate().map(|(i, &count)| {
            #[allow(clippy::cast_precision_loss)]
            let lower = (i as f64).mul_add(self.width, self.lower);
            Bin {
                lower,
                upper: lower + self.width,
                count,
            }
        })
    }

    /// The largest bin count, or zero for an empty histogram.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Whether there were no rents to bucket.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
