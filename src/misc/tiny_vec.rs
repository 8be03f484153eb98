/// Fixed capacity vector stored inline. Used for board cells, which never hold
/// more than a handful of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TinyVec<T, const N: usize>
where
    T: Copy,
{
    buf: [Option<T>; N],
    len: u8,
}

impl<T, const N: usize> TinyVec<T, N>
where
    T: Copy + PartialEq,
{
    pub const fn new() -> Self {
        const { assert!(N <= 255, "TinyVec supports up to 255 elements") }
        TinyVec { buf: [None; N], len: 0 }
    }

    /// Appends `val`, handing it back if the vector is full.
    pub fn push(&mut self, val: T) -> Result<(), T> {
        if self.is_full() {
            return Err(val);
        }
        self.buf[self.len as usize] = Some(val);
        self.len += 1;
        Ok(())
    }

    /// Removes the first element equal to `val`, keeping the order of the rest.
    pub fn remove(&mut self, val: &T) -> bool {
        let Some(pos) = self.iter().position(|x| x == val) else {
            return false;
        };
        let len = self.len as usize;
        for i in pos..len - 1 {
            self.buf[i] = self.buf[i + 1];
        }
        self.buf[len - 1] = None;
        self.len -= 1;
        true
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        if idx < self.len as usize {
            self.buf[idx].as_ref()
        } else {
            None
        }
    }

    pub fn contains(&self, val: &T) -> bool {
        self.iter().any(|x| x == val)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf[..self.len as usize].iter().flatten()
    }

    pub fn len(&self) -> u8 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len as usize == N
    }
}

impl<T, const N: usize> Default for TinyVec<T, N>
where
    T: Copy + PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut vec: TinyVec<u8, 2> = TinyVec::new();
        assert!(vec.is_empty());
        assert_eq!(vec.push(1), Ok(()));
        assert_eq!(vec.push(2), Ok(()));
        assert!(vec.is_full());
        assert_eq!(vec.push(3), Err(3));
        assert_eq!(vec.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut vec: TinyVec<u8, 3> = TinyVec::new();
        for i in 1..=3 {
            vec.push(i).unwrap();
        }
        assert!(vec.remove(&1));
        assert!(!vec.remove(&1));
        assert_eq!(vec.len(), 2);
        assert_eq!(vec.get(0), Some(&2));
        assert_eq!(vec.get(1), Some(&3));
        assert_eq!(vec.get(2), None);
        vec.push(4).unwrap();
        assert!(vec.contains(&4));
    }
}
