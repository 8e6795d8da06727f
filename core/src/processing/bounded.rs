use crate::prelude::{StageError, StageResult};

/// Growable buffer that refuses to grow past a fixed capacity.
#[derive(Debug, Clone)]
pub struct BoundedBuffer<T> {
    items: Vec<T>,
    max_capacity: usize,
}

impl<T> BoundedBuffer<T> {
    pub fn with_capacity(max_capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            max_capacity,
        }
    }

    /// Appends `item`, or reports the capacity that would have been exceeded.
    pub fn push(&mut self, item: T) -> StageResult<()> {
        if self.items.len() >= self.max_capacity {
            return Err(StageError::CapacityExceeded {
                requested: self.items.len() + 1,
                capacity: self.max_capacity,
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Appends as many items as fit; the first overflow is reported and the
    /// rest of `items` is dropped.
    pub fn extend_truncating<I>(&mut self, items: I) -> StageResult<()>
    where
        I: IntoIterator<Item = T>,
    {
        let mut iter = items.into_iter();
        while let Some(item) = iter.next() {
            if let Err(StageError::CapacityExceeded { capacity, .. }) = self.push(item) {
                return Err(StageError::CapacityExceeded {
                    requested: self.items.len() + 1 + iter.count(),
                    capacity,
                });
            }
        }
        Ok(())
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_rejects_items_past_capacity() {
        let mut buffer = BoundedBuffer::with_capacity(2);
        buffer.push(1).unwrap();
        buffer.push(2).unwrap();
        assert_eq!(
            buffer.push(3),
            Err(StageError::CapacityExceeded {
                requested: 3,
                capacity: 2
            })
        );
        assert_eq!(buffer.into_inner(), vec![1, 2]);
    }

    #[test]
    fn extend_truncating_keeps_the_head() {
        let mut buffer = BoundedBuffer::with_capacity(3);
        let result = buffer.extend_truncating(0..5);
        assert_eq!(
            result,
            Err(StageError::CapacityExceeded {
                requested: 5,
                capacity: 3
            })
        );
        assert_eq!(buffer.into_inner(), vec![0, 1, 2]);
    }
}
