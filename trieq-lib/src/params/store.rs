//! Lock-free parameter storage shared between the audio thread and
//! whatever thread writes parameters (UI, automation, CLI).

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use super::layout::{ParameterId, PARAMETER_COUNT};
use super::settings::FilterParameters;
use super::slope::Slope;
use super::ParamsError;

/// Read-only access to current parameter values.
///
/// Each `load` must be a non-blocking read of one self-consistent scalar. A
/// snapshot built from several loads is not transactional: a concurrent
/// write may land between two fields, which only delays that change by one
/// block.
pub trait ParameterSource {
    fn load(&self, id: ParameterId) -> f32;

    /// Read every parameter once.
    fn snapshot(&self) -> FilterParameters {
        FilterParameters {
            low_cut_freq: self.load(ParameterId::LowCutFreq),
            low_cut_slope: Slope::from_choice_value(self.load(ParameterId::LowCutSlope)),
            peak_freq: self.load(ParameterId::PeakFreq),
            peak_gain_db: self.load(ParameterId::PeakGain),
            peak_q: self.load(ParameterId::PeakQ),
            high_cut_freq: self.load(ParameterId::HighCutFreq),
            high_cut_slope: Slope::from_choice_value(self.load(ParameterId::HighCutSlope)),
        }
    }
}

impl ParameterSource for FilterParameters {
    fn load(&self, id: ParameterId) -> f32 {
        self.value(id)
    }

    fn snapshot(&self) -> FilterParameters {
        *self
    }
}

impl<T: ParameterSource + ?Sized> ParameterSource for Arc<T> {
    fn load(&self, id: ParameterId) -> f32 {
        (**self).load(id)
    }
}

/// Atomic store of every equalizer parameter, one `f32` per slot.
///
/// Writes snap to the parameter's legal values; reads never block.
#[derive(Debug)]
pub struct ParameterStore {
    values: [AtomicU32; PARAMETER_COUNT],
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterStore {
    /// A store holding every parameter's default.
    pub fn new() -> Self {
        Self {
            values: std::array::from_fn(|idx| {
                AtomicU32::new(ParameterId::ALL[idx].spec().default.to_bits())
            }),
        }
    }

    /// Current plain value of `id`.
    pub fn get(&self, id: ParameterId) -> f32 {
        f32::from_bits(self.values[id.index()].load(Ordering::Relaxed))
    }

    /// Current value of `id` mapped to `0..=1`.
    pub fn get_normalized(&self, id: ParameterId) -> f32 {
        id.spec().range.convert_to_normalized(self.get(id))
    }

    /// Store a plain value, snapped and clamped to the parameter's range.
    ///
    /// # Returns
    /// The value actually stored.
    ///
    /// # Errors
    /// Non-finite values are rejected and leave the parameter unchanged.
    pub fn set(&self, id: ParameterId, value: f32) -> Result<f32, ParamsError> {
        if !value.is_finite() {
            return Err(ParamsError::NonFinite { id: id.id() });
        }
        let legal = id.spec().range.snap_to_legal_value(value);
        self.store(id, legal);
        Ok(legal)
    }

    /// Store a value given in the normalized `0..=1` domain used by
    /// automation and generic controls.
    pub fn set_normalized(&self, id: ParameterId, normalized: f32) -> Result<f32, ParamsError> {
        if !normalized.is_finite() {
            return Err(ParamsError::NonFinite { id: id.id() });
        }
        let plain = id.spec().range.convert_from_normalized(normalized);
        self.set(id, plain)
    }

    /// Write every field of `params` into the store.
    ///
    /// # Errors
    /// Stops at the first non-finite field; earlier fields stay written.
    pub fn apply(&self, params: &FilterParameters) -> Result<(), ParamsError> {
        for id in ParameterId::ALL {
            self.set(id, params.value(id))?;
        }
        Ok(())
    }

    pub fn reset_to_defaults(&self) {
        for id in ParameterId::ALL {
            self.store(id, id.spec().default);
        }
    }

    fn store(&self, id: ParameterId, value: f32) {
        self.values[id.index()].store(value.to_bits(), Ordering::Relaxed);
    }
}

impl ParameterSource for ParameterStore {
    fn load(&self, id: ParameterId) -> f32 {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn new_store_holds_defaults() {
        let store = ParameterStore::new();
        assert_eq!(store.snapshot(), FilterParameters::default());
    }

    #[test]
    fn set_snaps_and_clamps() {
        let store = ParameterStore::new();
        assert_eq!(store.set(ParameterId::LowCutFreq, 99.6).expect("set"), 100.0);
        assert_eq!(store.set(ParameterId::PeakGain, 48.0).expect("set"), 24.0);
        assert_eq!(store.set(ParameterId::HighCutSlope, 2.2).expect("set"), 2.0);
        assert_eq!(store.snapshot().high_cut_slope, Slope::Db36);
        assert!(store.set(ParameterId::PeakQ, f32::NAN).is_err());
        assert_eq!(store.get(ParameterId::PeakQ), 1.0);
    }

    #[test]
    fn normalized_writes_follow_skew() {
        let store = ParameterStore::new();
        let stored = store
            .set_normalized(ParameterId::PeakFreq, 0.5)
            .expect("set normalized");
        assert!((stored - 5_015.0).abs() < 1.0, "stored {}", stored);
        assert!((store.get_normalized(ParameterId::PeakFreq) - 0.5).abs() < 1e-3);

        store
            .set_normalized(ParameterId::LowCutSlope, 1.0)
            .expect("set slope");
        assert_eq!(store.snapshot().low_cut_slope, Slope::Db48);
    }

    #[test]
    fn apply_round_trips_through_snapshot() {
        let store = ParameterStore::new();
        let params = FilterParameters {
            low_cut_freq: 80.0,
            low_cut_slope: Slope::Db24,
            peak_freq: 2_500.0,
            peak_gain_db: -6.0,
            peak_q: 2.0,
            high_cut_freq: 12_000.0,
            high_cut_slope: Slope::Db48,
        };
        store.apply(&params).expect("apply");
        let snapshot = store.snapshot();
        assert_eq!(snapshot.low_cut_slope, Slope::Db24);
        assert_eq!(snapshot.high_cut_slope, Slope::Db48);
        assert_eq!(snapshot.low_cut_freq, 80.0);
        assert!((snapshot.peak_gain_db + 6.0).abs() < 1e-4);

        store.reset_to_defaults();
        assert_eq!(store.snapshot(), FilterParameters::default());
    }

    #[test]
    fn concurrent_writes_never_tear_values() {
        let store = Arc::new(ParameterStore::new());
        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for step in 0..2_000 {
                    let value = if step % 2 == 0 { 100.0 } else { 5_000.0 };
                    store
                        .set(ParameterId::HighCutFreq, value)
                        .expect("set from writer");
                }
            })
        };

        for _ in 0..2_000 {
            let value = store.snapshot().high_cut_freq;
            assert!(
                value == 100.0 || value == 5_000.0 || value == 20_000.0,
                "torn value {}",
                value
            );
        }
        writer.join().expect("writer thread");
    }

    #[test]
    fn arc_store_is_a_source() {
        let store = Arc::new(ParameterStore::new());
        store.set(ParameterId::PeakFreq, 1_200.0).expect("set");
        assert_eq!(store.snapshot().peak_freq, 1_200.0);
    }
}
