use std::collections::{BTreeMap, HashMap};

use super::model::ShipmentDataset;

/// Number of equal-width bins used by the weight histogram unless overridden.
pub const DEFAULT_BIN_COUNT: usize = 15;

// ---------------------------------------------------------------------------
// CategoryCount – label → count, most frequent first
// ---------------------------------------------------------------------------

/// Counts per distinct label.
///
/// Ordered by descending count; labels with equal counts keep the order in
/// which they first appear in the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCount {
    entries: Vec<(String, usize)>,
}

impl CategoryCount {
    /// Count occurrences of every distinct label in `labels`.
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = &'a String>) -> Self {
        let mut position: HashMap<&str, usize> = HashMap::new();
        let mut entries: Vec<(String, usize)> = Vec::new();

        for label in labels {
            match position.get(label.as_str()) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    position.insert(label.as_str(), entries.len());
                    entries.push((label.clone(), 1));
                }
            }
        }
        // Stable sort keeps first-appearance order among ties.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        CategoryCount { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(label, n)| (label.as_str(), *n))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    /// Count for `label`, if present.
    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries.iter().find(|(l, _)| l == label).map(|(_, n)| *n)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Largest single count (0 when empty).
    pub fn max_count(&self) -> usize {
        self.entries.first().map_or(0, |(_, n)| *n)
    }

    /// Share of each label in percent, in the same order as [`iter`](Self::iter).
    /// Empty when the total is zero.
    pub fn percentages(&self) -> Vec<(&str, f64)> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        self.iter()
            .map(|(label, n)| (label, n as f64 * 100.0 / total as f64))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// GroupStat – group label → (mean, min, max)
// ---------------------------------------------------------------------------

/// Summary of customer ratings within one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Rating summaries keyed by group label, in sorted label order.
pub type GroupStat = BTreeMap<String, RatingStats>;

// ---------------------------------------------------------------------------
// HistogramBins – contiguous equal-width bins
// ---------------------------------------------------------------------------

/// One histogram bin covering `[start, end)`; the last bin also includes `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistogramBins {
    bins: Vec<HistogramBin>,
}

impl HistogramBins {
    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Sum of all bin counts.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// `(first.start, last.end)`, or `None` without bins.
    pub fn range(&self) -> Option<(f64, f64)> {
        Some((self.bins.first()?.start, self.bins.last()?.end))
    }
}

// ---------------------------------------------------------------------------
// The four views
// ---------------------------------------------------------------------------

/// Number of shipments per warehouse block.
pub fn count_by_warehouse(dataset: &ShipmentDataset) -> CategoryCount {
    CategoryCount::from_labels(dataset.warehouse_block())
}

/// Number of shipments per shipment mode, for a proportional rendering.
/// Use [`CategoryCount::percentages`] for the shares.
pub fn proportion_by_shipment_mode(dataset: &ShipmentDataset) -> CategoryCount {
    CategoryCount::from_labels(dataset.mode_of_shipment())
}

/// Mean, minimum and maximum customer rating per shipment mode.
pub fn rating_range_by_mode(dataset: &ShipmentDataset) -> GroupStat {
    // Sums are widened so that no sequence of i64 ratings can overflow them.
    let mut sums: BTreeMap<&str, (i128, i64, i64, usize)> = BTreeMap::new();

    for (mode, &rating) in dataset.mode_of_shipment().iter().zip(dataset.customer_rating()) {
        sums.entry(mode.as_str())
            .and_modify(|(sum, min, max, n)| {
                *sum += i128::from(rating);
                *min = (*min).min(rating);
                *max = (*max).max(rating);
                *n += 1;
            })
            .or_insert((i128::from(rating), rating, rating, 1));
    }

    sums.into_iter()
        .map(|(mode, (sum, min, max, count))| {
            let mean = (sum as f64 / count as f64).clamp(min as f64, max as f64);
            let stats = RatingStats {
                mean,
                min: min as f64,
                max: max as f64,
                count,
            };
            (mode.to_string(), stats)
        })
        .collect()
}

/// Partition the weight range into `bin_count` equal-width bins and count
/// shipments per bin.
///
/// The bins span exactly `[min, max]` of the finite weights; NaN and
/// infinite weights are not counted. When every weight is equal the span
/// becomes `[v - 0.5, v + 0.5]`; an empty dataset gives empty bins over
/// `[0, 1]`. A `bin_count` of zero is treated as one.
pub fn weight_histogram(dataset: &ShipmentDataset, bin_count: usize) -> HistogramBins {
    let n_bins = bin_count.max(1);
    let n = n_bins as f64;
    let weights: Vec<f64> = dataset
        .weight_in_gms()
        .iter()
        .copied()
        .filter(|w| w.is_finite())
        .collect();

    let (mut lo, mut hi) = weights
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &w| (lo.min(w), hi.max(w)));
    if weights.is_empty() {
        (lo, hi) = (0.0, 1.0);
    } else if lo == hi {
        (lo, hi) = (lo - 0.5, hi + 0.5);
    }

    // Work on halved values: `hi - lo` overflows for spans near f64::MAX.
    let half_span = hi / 2.0 - lo / 2.0;
    let mut edges: Vec<f64> = (0..=n_bins)
        .map(|i| {
            let t = i as f64 / n;
            (lo * (1.0 - t) + hi * t).clamp(lo, hi)
        })
        .collect();
    // Rounding must never let an edge fall below its predecessor.
    for i in 1..edges.len() {
        edges[i] = edges[i].max(edges[i - 1]);
    }
    // Pin the final edge so the bins cover the range exactly.
    edges[n_bins] = hi;

    let mut counts = vec![0usize; n_bins];
    for &w in &weights {
        let offset = w / 2.0 - lo / 2.0;
        let idx = if half_span <= 0.0 || w >= hi {
            n_bins - 1
        } else if (offset * n).is_finite() {
            (offset * n / half_span) as usize
        } else {
            (offset / half_span * n) as usize
        };
        counts[idx.min(n_bins - 1)] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: edges[i],
            end: edges[i + 1],
            count,
        })
        .collect();

    HistogramBins { bins }
}
