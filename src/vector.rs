use crate::ErrorKind;

/// Output container for generated frames
///
/// Implemented for `Vec` (feature `std`), `heapless::Vec` (feature `heapless`) and
/// `fixedvec::FixedVec` (feature `fixedvec`). Pushing beyond capacity must fail with
/// [`ErrorKind::OOB`].
pub trait VectorTrait<T: Copy> {
    fn push(&mut self, value: T) -> Result<(), ErrorKind>;
    fn extend(&mut self, other: &[T]) -> Result<(), ErrorKind>;
    fn clear(&mut self);
    fn as_slice(&self) -> &[T];
}

#[cfg(any(feature = "std", test))]
impl<T: Copy> VectorTrait<T> for Vec<T> {
    #[inline]
    fn push(&mut self, value: T) -> Result<(), ErrorKind> {
        Vec::push(self, value);
        Ok(())
    }
    #[inline]
    fn extend(&mut self, values: &[T]) -> Result<(), ErrorKind> {
        Vec::extend_from_slice(self, values);
        Ok(())
    }
    #[inline]
    fn clear(&mut self) {
        Vec::clear(self);
    }
    #[inline]
    fn as_slice(&self) -> &[T] {
        Vec::as_slice(self)
    }
}

#[cfg(any(feature = "fixedvec", test))]
use fixedvec::FixedVec;

#[cfg(any(feature = "fixedvec", test))]
impl<T: Copy> VectorTrait<T> for FixedVec<'_, T> {
    #[inline]
    fn push(&mut self, value: T) -> Result<(), ErrorKind> {
        FixedVec::push(self, value).map_err(|_| ErrorKind::OOB)
    }
    #[inline]
    fn extend(&mut self, values: &[T]) -> Result<(), ErrorKind> {
        FixedVec::push_all(self, values).map_err(|_| ErrorKind::OOB)
    }
    #[inline]
    fn clear(&mut self) {
        FixedVec::clear(self);
    }
    #[inline]
    fn as_slice(&self) -> &[T] {
        FixedVec::as_slice(self)
    }
}

#[cfg(feature = "heapless")]
use heapless::Vec as HeaplessVec;

#[cfg(feature = "heapless")]
impl<T: Copy, const N: usize> VectorTrait<T> for HeaplessVec<T, N> {
    #[inline]
    fn push(&mut self, value: T) -> Result<(), ErrorKind> {
        HeaplessVec::push(self, value).map_err(|_| ErrorKind::OOB)
    }
    #[inline]
    fn extend(&mut self, values: &[T]) -> Result<(), ErrorKind> {
        self.extend_from_slice(values).map_err(|_| ErrorKind::OOB)
    }
    #[inline]
    fn clear(&mut self) {
        HeaplessVec::clear(self);
    }
    #[inline]
    fn as_slice(&self) -> &[T] {
        HeaplessVec::as_slice(self)
    }
}
