//! Live particle storage
//!
//! Particles live in a contiguous, unordered buffer. Removal swaps the last
//! particle into the vacated slot, so a pass that walks indices from the back
//! to the front can remove the particle it is visiting without skipping or
//! revisiting any other: whatever lands in the vacated slot has already been
//! visited.

/// Unordered collection of live particles
#[derive(Debug, Clone)]
pub struct ParticleRegistry<T> {
    particles: Vec<T>,
}

impl<T> Default for ParticleRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ParticleRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
        }
    }

    /// Create an empty registry with room for `capacity` particles
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
        }
    }

    /// Add a particle
    pub fn insert(&mut self, particle: T) {
        self.particles.push(particle);
    }

    /// Number of live particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether no particles are live
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Borrow the particle in `index`
    pub fn get(&self, index: usize) -> Option<&T> {
        self.particles.get(index)
    }

    /// Mutably borrow the particle in `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.particles.get_mut(index)
    }

    /// Remove the particle in `index`, moving the last particle into its slot
    pub fn swap_remove(&mut self, index: usize) -> Option<T> {
        (index < self.particles.len()).then(|| self.particles.swap_remove(index))
    }

    /// Iterate over live particles in storage order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.particles.iter()
    }

    /// Remove the most recently stored particle
    pub fn pop(&mut self) -> Option<T> {
        self.particles.pop()
    }
}

impl<'a, T> IntoIterator for &'a ParticleRegistry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_and_len() {
        let mut registry = ParticleRegistry::new();
        assert!(registry.is_empty());
        registry.insert(1);
        registry.insert(2);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(1), Some(&2));
    }

    #[test]
    fn test_swap_remove_moves_last() {
        let mut registry = ParticleRegistry::new();
        for i in 0..4 {
            registry.insert(i);
        }
        assert_eq!(registry.swap_remove(1), Some(1));
        assert_eq!(registry.iter().copied().collect::<Vec<_>>(), vec![0, 3, 2]);
    }

    #[test]
    fn test_swap_remove_out_of_range() {
        let mut registry: ParticleRegistry<u8> = ParticleRegistry::new();
        assert_eq!(registry.swap_remove(0), None);
    }

    #[test]
    fn test_reverse_sweep_visits_each_once() {
        let mut registry = ParticleRegistry::with_capacity(10);
        for i in 0..10 {
            registry.insert(i);
        }

        let mut visited = Vec::new();
        for index in (0..registry.len()).rev() {
            let Some(&value) = registry.get(index) else {
                continue;
            };
            visited.push(value);
            if value % 3 == 0 {
                registry.swap_remove(index);
            }
        }

        visited.sort_unstable();
        assert_eq!(visited, (0..10).collect::<Vec<_>>());

        let mut survivors: Vec<_> = registry.iter().copied().collect();
        survivors.sort_unstable();
        assert_eq!(survivors, vec![1, 2, 4, 5, 7, 8]);
    }

    #[test]
    fn test_pop_takes_from_back() {
        let mut registry = ParticleRegistry::new();
        registry.insert('a');
        registry.insert('b');
        assert_eq!(registry.pop(), Some('b'));
        assert_eq!(registry.pop(), Some('a'));
        assert_eq!(registry.pop(), None);
        assert!(registry.is_empty());
    }
}
