//! Walking cause chains

use std::error::Error;
use std::iter::FusedIterator;

/// Iterator over an error and its transitive sources
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn Error + 'static)>,
}

/// Iterate over `err` followed by each of its sources, outermost first
pub fn chain<'a>(err: &'a (dyn Error + 'static)) -> Chain<'a> {
    Chain { next: Some(err) }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}

/// Find the first error of type `T` in the chain of `err`, `err` included
///
/// Aggregates are leaves here: their constituents are not searched.
pub fn as_type<'a, T>(err: &'a (dyn Error + 'static)) -> Option<&'a T>
where
    T: Error + 'static,
{
    chain(err).find_map(|err| err.downcast_ref::<T>())
}
