//! Slenderness guard (§4.4): on very long, thin parts the curvature and
//! direction-change stencils tend to pick up noise from sampling jitter
//! rather than real bends, so a high ratio between the longest and
//! second-longest bounding-box axes progressively clamps the reported
//! count.

use tubeline_core::BoundingBox;

pub(crate) struct GuardResult {
    pub bends: i64,
    pub confidence_capped: bool,
}

pub(crate) fn guard(
    bbox: BoundingBox,
    weighted_bends: i64,
    top_method_bends: i64,
    curvature_bends: i64,
    direction_bends: i64,
) -> GuardResult {
    let (longest, second, _) = bbox.sorted_dimensions();
    let s = longest / second.max(1e-3);

    let mut bends = weighted_bends;
    let mut confidence_capped = false;

    if s > 10.0 && top_method_bends <= 1 {
        bends = top_method_bends;
    }
    if s > 12.0 && (curvature_bends <= 1 || direction_bends <= 1) {
        bends = bends.min(1);
    }
    if s > 18.0 {
        bends = 0;
    }
    if s > 22.0 {
        bends = bends.min(1);
    }
    if s > 30.0 {
        bends = 0;
        confidence_capped = true;
    }

    GuardResult { bends, confidence_capped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tubeline_core::Point3;

    fn bbox_with_dims(longest: f64, second: f64, shortest: f64) -> BoundingBox {
        [Point3::new(0.0, 0.0, 0.0), Point3::new(longest, second, shortest)]
            .into_iter()
            .collect()
    }

    proptest! {
        #[test]
        fn guard_never_raises_the_count_and_clamps_at_extreme_slenderness(
            second in 0.01f64..100.0,
            ratio in 0.5f64..40.0,
            weighted_bends in 0i64..20,
            top_method_bends in 0i64..20,
            curvature_bends in 0i64..20,
            direction_bends in 0i64..20,
        ) {
            let longest = second * ratio;
            let bbox = bbox_with_dims(longest, second, second / 2.0);
            let s = longest / second.max(1e-3);
            let result = guard(bbox, weighted_bends, top_method_bends, curvature_bends, direction_bends);

            prop_assert!(result.bends >= 0);
            prop_assert!(result.bends <= weighted_bends.max(top_method_bends));
            if s > 30.0 {
                prop_assert_eq!(result.bends, 0);
                prop_assert!(result.confidence_capped);
            }
            if s > 18.0 && s <= 22.0 {
                prop_assert_eq!(result.bends, 0);
            }
        }
    }

    #[test]
    fn moderate_slenderness_leaves_count_untouched() {
        let bbox = bbox_with_dims(10.0, 5.0, 5.0);
        let result = guard(bbox, 2, 2, 2, 2);
        assert_eq!(result.bends, 2);
        assert!(!result.confidence_capped);
    }

    #[test]
    fn extreme_slenderness_forces_zero_bends() {
        let bbox = bbox_with_dims(100.0, 1.0, 1.0);
        let result = guard(bbox, 3, 3, 3, 3);
        assert_eq!(result.bends, 0);
        assert!(result.confidence_capped);
    }

    #[test]
    fn very_high_slenderness_clamps_to_one_without_agreement() {
        let bbox = bbox_with_dims(15.0, 1.0, 1.0);
        let result = guard(bbox, 4, 4, 1, 4);
        assert_eq!(result.bends, 1);
    }
}
