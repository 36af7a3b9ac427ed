//! Split at an index into the elements before, the element itself (mutably), and the elements after.

pub(crate) trait SliceSplit3<T> {
    fn split3_mut(&mut self, index: usize) -> (&[T], &mut T, &[T]);
    /// Visit every element mutably while seeing the elements around it.
    fn for_each_split3_mut<F: FnMut(usize, &[T], &mut T, &[T])>(&mut self, f: F);
}

impl<T> SliceSplit3<T> for [T] {
    fn split3_mut(&mut self, index: usize) -> (&[T], &mut T, &[T]) {
        let (before, current_and_after) = self.split_at_mut(index);
        let (current, after) = current_and_after.split_first_mut().expect("split3_mut: index out of bounds");
        (before, current, after)
    }

    fn for_each_split3_mut<F: FnMut(usize, &[T], &mut T, &[T])>(&mut self, mut f: F) {
        for index in 0..self.len() {
            let (before, current, after) = self.split3_mut(index);
            f(index, before, current, after);
        }
    }
}
