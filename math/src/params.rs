use crate::modulus::backend::Backend;

/// Named `(n, q)` parameter set of a negacyclic transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NttParams {
    pub n: usize,
    pub q: u64,
    /// Primitive `2n`-th root of unity; searched for when `None`.
    pub root: Option<u64>,
    pub backend: Backend,
}

impl NttParams {
    pub const Q7681_N256: NttParams = NttParams::new(256, 7681);
    pub const Q12289_N512: NttParams = NttParams::new(512, 12289).with_root(49);
    pub const Q12289_N1024: NttParams = NttParams::new(1024, 12289).with_root(7);
    pub const Q8380417_N256: NttParams = NttParams::new(256, 8380417);
    pub const Q8399873_N512: NttParams = NttParams::new(512, 8399873).with_root(15287);

    pub const PRESETS: [NttParams; 5] = [
        Self::Q7681_N256,
        Self::Q12289_N512,
        Self::Q12289_N1024,
        Self::Q8380417_N256,
        Self::Q8399873_N512,
    ];

    pub const fn new(n: usize, q: u64) -> Self {
        Self {
            n,
            q,
            root: None,
            backend: Backend::Barrett,
        }
    }

    pub const fn with_root(mut self, root: u64) -> Self {
        self.root = Some(root);
        self
    }

    pub const fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn log_n(&self) -> u32 {
        self.n.trailing_zeros()
    }
}
