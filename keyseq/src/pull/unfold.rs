/// Iterator yielding `seed`, then `step(&seed, 0)`, then `step(&that, 1)`, and so on, forever.
///
/// Unlike [`core::iter::successors`], a step runs only when its element is requested, never one ahead.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Unfold<V, Func> {
    seed: Option<V>,
    prev: Option<V>,
    index: usize,
    step: Func,
}

impl<V, Func> Unfold<V, Func>
where
    V: Clone,
    Func: FnMut(&V, usize) -> V,
{
    /// Creates with the first element `seed` and the `step` function.
    pub fn new(seed: V, step: Func) -> Self {
        Self {
            seed: Some(seed),
            prev: None,
            index: 0,
            step,
        }
    }
}

impl<V, Func> Iterator for Unfold<V, Func>
where
    V: Clone,
    Func: FnMut(&V, usize) -> V,
{
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        let next = match &self.prev {
            Some(prev) => {
                let next = (self.step)(prev, self.index);
                self.index += 1;
                next
            }
            // First element.
            None => self.seed.take()?,
        };
        self.prev = Some(next.clone());
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod test {
    use core::cell::Cell;

    use super::*;

    #[test]
    fn test_unfold_steps_lazily() {
        let steps = Cell::new(0);
        let mut unfold = Unfold::new(1, |x: &u64, _| {
            steps.set(steps.get() + 1);
            x * 2
        });
        assert_eq!(Some(1), unfold.next());
        assert_eq!(0, steps.get());
        assert_eq!(Some(2), unfold.next());
        assert_eq!(Some(4), unfold.next());
        assert_eq!(2, steps.get());
    }

    #[test]
    fn test_unfold_passes_index() {
        let got: Vec<_> = Unfold::new(0, |x: &usize, i| x + i).take(5).collect();
        assert_eq!(vec![0, 0, 1, 3, 6], got);
    }
}
