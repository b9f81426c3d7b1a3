use std::cell::OnceCell;

/// A lazily computed value that can be reset.
#[derive(Debug, Clone)]
pub struct Memo<T>(OnceCell<T>);

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self(OnceCell::new())
    }
}

impl<T> Memo<T> {
    /// Returns the cached value, computing it on first access.
    pub fn get_or_compute(&self, compute: impl FnOnce() -> T) -> &T {
        self.0.get_or_init(compute)
    }

    pub fn get(&self) -> Option<&T> {
        self.0.get()
    }

    pub fn is_computed(&self) -> bool {
        self.0.get().is_some()
    }

    pub fn reset(&mut self) {
        self.0.take();
    }
}

/// Observables derived from the torque profile.
///
/// Arrays cover the active range `[first, last]`.
#[derive(Debug, Clone, Default)]
pub struct ObservableCache {
    pub(crate) w: Memo<Vec<f64>>,
    pub(crate) sigma: Memo<Vec<f64>>,
    pub(crate) height: Memo<Vec<f64>>,
    pub(crate) tph: Memo<Vec<f64>>,
    pub(crate) tph_vis: Memo<Vec<f64>>,
    pub(crate) tph_x: Memo<Vec<f64>>,
    pub(crate) tirr: Memo<Vec<f64>>,
    pub(crate) cirr: Memo<Vec<f64>>,
    pub(crate) qx: Memo<Vec<f64>>,
    pub(crate) mdisk: Memo<f64>,
    pub(crate) lx: Memo<f64>,
    /// Magnitudes in `Band::ALL` order
    pub(crate) magnitudes: [Memo<f64>; 6],
}

impl ObservableCache {
    /// Drops every cached value.
    pub fn invalidate(&mut self) {
        *self = Self::default();
    }

    /// Number of cells currently holding a value.
    pub fn computed(&self) -> usize {
        let arrays = [
            &self.w,
            &self.sigma,
            &self.height,
            &self.tph,
            &self.tph_vis,
            &self.tph_x,
            &self.tirr,
            &self.cirr,
            &self.qx,
        ];
        let scalars = [&self.mdisk, &self.lx]
            .into_iter()
            .chain(self.magnitudes.iter());
        arrays.iter().filter(|m| m.is_computed()).count()
            + scalars.filter(|m| m.is_computed()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.computed() == 0
    }
}
