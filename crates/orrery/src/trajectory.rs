//! Bounded trail of past positions

use std::collections::VecDeque;

use nalgebra::Point3;

use crate::config::TRAJECTORY_CAPACITY;

/// FIFO buffer of past positions, capped at a fixed length
///
/// Once full, every push evicts the oldest entry. Only used for drawing
/// trails; the physics never reads it.
///
/// # Examples
///
/// ```
/// use orrery::trajectory::Trajectory;
/// use nalgebra::Point3;
///
/// let mut trail = Trajectory::with_capacity(2);
/// trail.push(Point3::new(1.0, 0.0, 0.0));
/// trail.push(Point3::new(2.0, 0.0, 0.0));
/// trail.push(Point3::new(3.0, 0.0, 0.0));
///
/// assert_eq!(trail.len(), 2);
/// assert_eq!(trail.oldest(), Some(&Point3::new(2.0, 0.0, 0.0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    points: VecDeque<Point3<f64>>,
    capacity: usize,
}

impl Trajectory {
    /// Creates an empty trail holding at most `capacity` points
    ///
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a position, evicting the oldest entries beyond capacity
    pub fn push(&mut self, position: Point3<f64>) {
        self.points.push_back(position);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Changes the bound, dropping the oldest entries if the trail is now too long
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn oldest(&self) -> Option<&Point3<f64>> {
        self.points.front()
    }

    pub fn latest(&self) -> Option<&Point3<f64>> {
        self.points.back()
    }

    /// Iterates from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.points.iter()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::with_capacity(TRAJECTORY_CAPACITY)
    }
}
