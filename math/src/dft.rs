pub mod ntt;

/// In-place transform to and from the evaluation domain.
pub trait DFT<O> {
    fn forward_inplace(&self, x: &mut [O]);
    fn backward_inplace(&self, x: &mut [O]);
}
