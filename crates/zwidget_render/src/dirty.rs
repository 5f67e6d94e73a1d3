//! Dirty region tracking
//!
//! Accumulates the rectangles that need repainting between frames. New
//! rectangles are merged greedily into the first tracked rectangle they
//! overlap; once more than [`MAX_DIRTY_REGIONS`] disjoint rectangles pile up
//! the tracker gives up on partial redraws and reports the whole surface.

use smallvec::SmallVec;
use zwidget_platform::Rect;

/// Tracked rectangles beyond this count escalate to a full repaint
pub const MAX_DIRTY_REGIONS: usize = 10;

/// Dirty region tracker for partial redraws
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirtyRegionTracker {
    /// Never contains degenerate rects; empty while `full_dirty` is set
    regions: SmallVec<[Rect; MAX_DIRTY_REGIONS]>,
    full_dirty: bool,
}

impl DirtyRegionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `rect` as needing a repaint
    ///
    /// The merge is single-pass: `rect` is unioned into the first tracked
    /// rectangle it overlaps (touching edges count) and the grown rectangle
    /// is not re-checked against the others.
    pub fn mark_dirty(&mut self, rect: Rect) {
        if self.full_dirty || rect.is_degenerate() {
            return;
        }

        if let Some(existing) = self.regions.iter_mut().find(|r| r.overlaps(&rect)) {
            *existing = existing.union(&rect);
            return;
        }

        if self.regions.len() == MAX_DIRTY_REGIONS {
            tracing::trace!(
                limit = MAX_DIRTY_REGIONS,
                "too many dirty regions, escalating to full repaint"
            );
            self.mark_full_dirty();
            return;
        }
        self.regions.push(rect);
    }

    /// Everything needs a repaint
    pub fn mark_full_dirty(&mut self) {
        self.full_dirty = true;
        self.regions.clear();
    }

    /// Forget all pending damage
    pub fn clear(&mut self) {
        self.full_dirty = false;
        self.regions.clear();
    }

    pub fn is_dirty(&self) -> bool {
        self.full_dirty || !self.regions.is_empty()
    }

    pub fn is_full_dirty(&self) -> bool {
        self.full_dirty
    }

    /// Tracked rectangles; empty when full dirty
    pub fn regions(&self) -> &[Rect] {
        &self.regions
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Bounding box of all pending damage, or `bounds` when full dirty
    pub fn bounding_box(&self, bounds: Rect) -> Option<Rect> {
        if self.full_dirty {
            return Some(bounds);
        }
        let (first, rest) = self.regions.split_first()?;
        Some(rest.iter().fold(*first, |acc, r| acc.union(r)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disjoint(i: i32) -> Rect {
        Rect::new(i * 20, 0, 5, 5)
    }

    #[test]
    fn test_new_tracker_is_clean() {
        let tracker = DirtyRegionTracker::new();
        assert!(!tracker.is_dirty());
        assert!(!tracker.is_full_dirty());
        assert!(tracker.regions().is_empty());
    }

    #[test]
    fn test_overlapping_rects_merge() {
        let mut tracker = DirtyRegionTracker::new();
        tracker.mark_dirty(Rect::new(0, 0, 10, 10));
        tracker.mark_dirty(Rect::new(5, 5, 10, 10));
        assert_eq!(tracker.regions(), &[Rect::new(0, 0, 15, 15)]);
    }

    #[test]
    fn test_touching_rects_merge() {
        let mut tracker = DirtyRegionTracker::new();
        tracker.mark_dirty(Rect::new(0, 0, 10, 10));
        tracker.mark_dirty(Rect::new(10, 0, 10, 10));
        assert_eq!(tracker.regions(), &[Rect::new(0, 0, 20, 10)]);
    }

    #[test]
    fn test_disjoint_rects_are_kept_apart() {
        let mut tracker = DirtyRegionTracker::new();
        tracker.mark_dirty(Rect::new(0, 0, 10, 10));
        tracker.mark_dirty(Rect::new(100, 100, 10, 10));
        assert_eq!(tracker.region_count(), 2);
        assert_eq!(tracker.regions()[1], Rect::new(100, 100, 10, 10));
    }

    #[test]
    fn test_degenerate_rects_are_ignored() {
        let mut tracker = DirtyRegionTracker::new();
        tracker.mark_dirty(Rect::new(0, 0, 0, 10));
        tracker.mark_dirty(Rect::new(0, 0, 10, -1));
        assert!(!tracker.is_dirty());
    }

    #[test]
    fn test_ten_regions_fit() {
        let mut tracker = DirtyRegionTracker::new();
        for i in 0..10 {
            tracker.mark_dirty(disjoint(i));
        }
        assert_eq!(tracker.region_count(), MAX_DIRTY_REGIONS);
        assert!(!tracker.is_full_dirty());
    }

    #[test]
    fn test_eleventh_region_escalates() {
        let mut tracker = DirtyRegionTracker::new();
        for i in 0..11 {
            tracker.mark_dirty(disjoint(i));
        }
        assert!(tracker.is_full_dirty());
        assert!(tracker.regions().is_empty());
        assert!(tracker.is_dirty());
    }

    #[test]
    fn test_full_dirty_absorbs_new_rects() {
        let mut tracker = DirtyRegionTracker::new();
        tracker.mark_full_dirty();
        tracker.mark_dirty(Rect::new(0, 0, 10, 10));
        assert!(tracker.regions().is_empty());
        assert!(tracker.is_full_dirty());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut tracker = DirtyRegionTracker::new();
        tracker.mark_dirty(Rect::new(0, 0, 10, 10));
        tracker.mark_full_dirty();
        tracker.clear();
        let once = tracker.clone();
        tracker.clear();
        assert_eq!(tracker, once);
        assert!(!tracker.is_dirty());
    }

    #[test]
    fn test_merge_is_greedy_first_overlap() {
        let mut tracker = DirtyRegionTracker::new();
        tracker.mark_dirty(Rect::new(0, 0, 10, 10));
        tracker.mark_dirty(Rect::new(30, 0, 10, 10));
        // overlaps both; only the first absorbs it
        tracker.mark_dirty(Rect::new(5, 0, 30, 5));

        assert_eq!(
            tracker.regions(),
            &[Rect::new(0, 0, 35, 10), Rect::new(30, 0, 10, 10)]
        );
    }

    #[test]
    fn test_grown_region_is_not_remerged() {
        let mut tracker = DirtyRegionTracker::new();
        tracker.mark_dirty(Rect::new(0, 0, 10, 10));
        tracker.mark_dirty(Rect::new(50, 0, 10, 10));
        // grows the first region until it overlaps the second
        tracker.mark_dirty(Rect::new(8, 0, 45, 10));
        assert_eq!(tracker.region_count(), 2);
    }

    #[test]
    fn test_bounding_box() {
        let mut tracker = DirtyRegionTracker::new();
        let bounds = Rect::new(0, 0, 800, 600);
        assert_eq!(tracker.bounding_box(bounds), None);

        tracker.mark_dirty(Rect::new(10, 10, 10, 10));
        tracker.mark_dirty(Rect::new(100, 50, 10, 10));
        assert_eq!(tracker.bounding_box(bounds), Some(Rect::new(10, 10, 100, 50)));

        tracker.mark_full_dirty();
        assert_eq!(tracker.bounding_box(bounds), Some(bounds));
    }
}
