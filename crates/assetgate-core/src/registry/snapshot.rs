//! Point-in-time view of the registry order.

use std::sync::Arc;

use crate::transform::Transform;

/// Transforms captured in ascending priority order.
///
/// Taking the snapshot releases the registry lock, so registrations made
/// afterwards are not reflected here. `iter` can be called any number of
/// times over the same captured order.
#[derive(Clone, Default)]
pub struct OrderedTransforms {
    transforms: Vec<Arc<dyn Transform>>,
}

impl OrderedTransforms {
    pub(super) fn new(transforms: Vec<Arc<dyn Transform>>) -> Self {
        Self { transforms }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<dyn Transform>> {
        self.transforms.iter()
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Names in order, for logging.
    pub fn names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }
}

impl IntoIterator for OrderedTransforms {
    type Item = Arc<dyn Transform>;
    type IntoIter = std::vec::IntoIter<Arc<dyn Transform>>;

    fn into_iter(self) -> Self::IntoIter {
        self.transforms.into_iter()
    }
}

impl<'a> IntoIterator for &'a OrderedTransforms {
    type Item = &'a Arc<dyn Transform>;
    type IntoIter = std::slice::Iter<'a, Arc<dyn Transform>>;

    fn into_iter(self) -> Self::IntoIter {
        self.transforms.iter()
    }
}
