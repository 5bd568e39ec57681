// Per-event multiplicity sampling and the calibrated multiplicity table.

use crate::error::{Error, Result};
use crate::species::SpeciesDatabase;
use log::warn;
use rand::Rng;
use rand_distr::{Distribution, Normal, Poisson};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// How per-species mean yields fluctuate into integer counts per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FluctuationMode {
    Poisson,
    Gaussian,
    /// Poisson below `HYBRID_THRESHOLD`, Gaussian above (tail cost tradeoff).
    Hybrid,
    /// Not implemented in the reference design; draws zero and warns.
    NegativeBinomial,
}

/// Mean yield above which the hybrid mode switches to the Gaussian draw.
pub const HYBRID_THRESHOLD: f64 = 20.0;

/// Draw a non-negative particle count for one species in one event.
///
/// A zero (or negative) mean is deterministic: every mode returns 0.
pub fn sample_multiplicity<R: Rng + ?Sized>(
    mean: f64,
    mode: FluctuationMode,
    rng: &mut R,
) -> u64 {
    if mean <= 0.0 {
        return 0;
    }
    match mode {
        FluctuationMode::Poisson => poisson_draw(mean, rng),
        FluctuationMode::Gaussian => gaussian_draw(mean, rng),
        FluctuationMode::Hybrid => {
            if mean < HYBRID_THRESHOLD {
                poisson_draw(mean, rng)
            } else {
                gaussian_draw(mean, rng)
            }
        }
        FluctuationMode::NegativeBinomial => {
            warn!("negative-binomial fluctuations are not implemented; drawing 0");
            0
        }
    }
}

fn poisson_draw<R: Rng + ?Sized>(mean: f64, rng: &mut R) -> u64 {
    // mean > 0 is guaranteed by the caller, so construction cannot fail
    let dist = Poisson::new(mean).unwrap();
    dist.sample(rng) as u64
}

fn gaussian_draw<R: Rng + ?Sized>(mean: f64, rng: &mut R) -> u64 {
    let dist = Normal::new(mean, mean.sqrt()).unwrap();
    let n = dist.sample(rng).round();
    if n > 0.0 {
        n as u64
    } else {
        0
    }
}

/// Calibration result for one species.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiplicityRow {
    pub name: String,
    /// Upper bound on the Cooper-Frye integrand over the sampling hyper-cube.
    /// Emission is biased if this underestimates the true supremum.
    pub max_integrand: f64,
    /// Monte Carlo estimate of the per-event mean yield.
    pub mean_yield: f64,
}

/// Per-species (max integrand, mean yield) pairs in database order, produced
/// by the offline calibration pass or imported from a previous run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiplicityTable {
    rows: Vec<MultiplicityRow>,
}

impl MultiplicityTable {
    pub fn new(rows: Vec<MultiplicityRow>) -> Self {
        Self { rows }
    }

    pub fn row(&self, id: usize) -> &MultiplicityRow {
        &self.rows[id]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MultiplicityRow> {
        self.rows.iter()
    }

    /// Check that this table matches the species database it will be used
    /// with: same length, same names, same order.
    pub fn validate_against(&self, db: &SpeciesDatabase) -> Result<()> {
        if self.rows.len() != db.len() {
            return Err(Error::Config(format!(
                "multiplicity table has {} rows but database has {} species",
                self.rows.len(),
                db.len()
            )));
        }
        for (id, row) in self.rows.iter().enumerate() {
            let expected = &db.get(id).name;
            if &row.name != expected {
                return Err(Error::Config(format!(
                    "multiplicity table row {id} is '{}' but database expects '{expected}'",
                    row.name
                )));
            }
        }
        Ok(())
    }

    /// Write the table as plain text, one `name  max_integrand  mean_yield`
    /// line per species in database order.
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = std::fs::File::create(path)?;
        for row in &self.rows {
            writeln!(file, "{}\t{}\t{}", row.name, row.max_integrand, row.mean_yield)?;
        }
        Ok(())
    }

    /// Read a table previously written by [`export`](Self::export), skipping
    /// the calibration pass. The file must list every species in database
    /// order; anything else is a fatal startup error.
    pub fn import<P: AsRef<Path>>(path: P, db: &SpeciesDatabase) -> Result<Self> {
        let reader = BufReader::new(std::fs::File::open(path)?);
        let mut rows = Vec::with_capacity(db.len());
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut fields = trimmed.split_whitespace();
            let name = fields.next().ok_or(Error::MalformedTable {
                line: i + 1,
                detail: "missing species name".into(),
            })?;
            let max_integrand = parse_field(fields.next(), i + 1, "max integrand")?;
            let mean_yield = parse_field(fields.next(), i + 1, "mean yield")?;
            if max_integrand < 0.0 || mean_yield < 0.0 {
                return Err(Error::MalformedTable {
                    line: i + 1,
                    detail: "negative table entry".into(),
                });
            }
            rows.push(MultiplicityRow {
                name: name.to_string(),
                max_integrand,
                mean_yield,
            });
        }
        let table = Self { rows };
        table.validate_against(db)?;
        Ok(table)
    }
}

fn parse_field(field: Option<&str>, line: usize, what: &str) -> Result<f64> {
    let text = field.ok_or_else(|| Error::MalformedTable {
        line,
        detail: format!("missing {what}"),
    })?;
    text.parse::<f64>().map_err(|e| Error::MalformedTable {
        line,
        detail: format!("unparseable {what} '{text}': {e}"),
    })
}
