//! Collision detection and removal bookkeeping
//!
//! Every entity pair uses the same circular proximity test: two bodies touch
//! when the distance between their centers is less than the sum of their
//! radii. Passes mark what they destroy and compact the collections afterwards,
//! so nothing is removed while a collection is being walked.

use glam::DVec2;

use super::entity::Body;

/// Circle-circle overlap (strict; touching edges do not collide)
#[inline]
pub fn circles_overlap(a: DVec2, a_radius: f64, b: DVec2, b_radius: f64) -> bool {
    a.distance_squared(b) < (a_radius + b_radius) * (a_radius + b_radius)
}

/// Proximity test shared by every entity pair
#[inline]
pub fn collides<A, B>(a: &A, b: &B) -> bool
where
    A: Body + ?Sized,
    B: Body + ?Sized,
{
    circles_overlap(a.position(), a.radius(), b.position(), b.radius())
}

/// Removal marks for one collection during a collision pass
#[derive(Debug, Clone)]
pub struct Marks {
    marked: Vec<bool>,
}

impl Marks {
    pub fn new(len: usize) -> Self {
        Self {
            marked: vec![false; len],
        }
    }

    #[inline]
    pub fn mark(&mut self, index: usize) {
        self.marked[index] = true;
    }

    #[inline]
    pub fn is_marked(&self, index: usize) -> bool {
        self.marked[index]
    }

    pub fn count(&self) -> usize {
        self.marked.iter().filter(|m| **m).count()
    }

    /// Remove every marked item, preserving the order of the rest
    pub fn sweep<T>(self, items: &mut Vec<T>) {
        debug_assert_eq!(items.len(), self.marked.len());
        let mut index = 0;
        items.retain(|_| {
            let keep = !self.marked[index];
            index += 1;
            keep
        });
    }
}
