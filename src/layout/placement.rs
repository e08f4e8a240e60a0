//! Greedy de-collision of 1-D label positions.
//!
//! Both label passes of the timeline layout go through this routine: date
//! labels climbing above the axis and interval-group labels spreading along
//! it. Positions only ever move forward; an accepted label is never
//! revisited, so the result depends on input order.

use super::error::LayoutError;

/// Push positions apart until no pair is closer than `min_distance`.
///
/// Positions are processed in input order. Each candidate starts at its
/// original value and advances by `min_distance` while any previously
/// accepted position lies strictly within `min_distance` of it. The output
/// keeps input order and length; every value is >= its input. Later labels
/// never move earlier ones, so packing is greedy rather than optimal.
pub fn adjust_positions(positions: &[f32], min_distance: f32) -> Result<Vec<f32>, LayoutError> {
    if !min_distance.is_finite() || min_distance <= 0.0 {
        return Err(LayoutError::InvalidParameter {
            value: min_distance,
        });
    }
    if let Some((index, &value)) = positions
        .iter()
        .enumerate()
        .find(|(_, value)| !value.is_finite())
    {
        return Err(LayoutError::InvalidInput { index, value });
    }

    let mut adjusted: Vec<f32> = Vec::with_capacity(positions.len());
    for &position in positions {
        let mut candidate = position;
        while adjusted
            .iter()
            .any(|&accepted| (candidate - accepted).abs() < min_distance)
        {
            candidate += min_distance;
        }
        adjusted.push(candidate);
    }
    Ok(adjusted)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_close(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < EPS, "{actual:?} vs {expected:?}");
        }
    }

    fn assert_separated(positions: &[f32], min_distance: f32) {
        for (i, a) in positions.iter().enumerate() {
            for b in positions.iter().skip(i + 1) {
                assert!(
                    (a - b).abs() >= min_distance - EPS,
                    "|{a} - {b}| < {min_distance} in {positions:?}"
                );
            }
        }
    }

    #[test]
    fn coincident_positions_climb_by_steps() {
        let out = adjust_positions(&[0.0, 0.0, 0.0], 0.6).unwrap();
        assert_close(&out, &[0.0, 0.6, 1.2]);
    }

    #[test]
    fn separated_input_is_unchanged() {
        let out = adjust_positions(&[1.0, 5.0], 0.6).unwrap();
        assert_close(&out, &[1.0, 5.0]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(adjust_positions(&[], 0.6).unwrap().is_empty());
    }

    #[test]
    fn four_duplicates_form_a_ladder() {
        let out = adjust_positions(&[2.0, 2.0, 2.0, 2.0], 1.0).unwrap();
        assert_close(&out, &[2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn single_position_is_returned_as_is() {
        let out = adjust_positions(&[3.25], 0.5).unwrap();
        assert_close(&out, &[3.25]);
    }

    #[test]
    fn output_never_moves_backward() {
        let input = [4.0, 0.1, 0.0, 3.9, 0.2, 8.0];
        let out = adjust_positions(&input, 0.75).unwrap();
        assert_eq!(out.len(), input.len());
        for (adjusted, original) in out.iter().zip(&input) {
            assert!(adjusted >= original, "{out:?} moved below {input:?}");
        }
        assert_separated(&out, 0.75);
    }

    #[test]
    fn near_collisions_resolve_forward() {
        // The second label sits within min_distance of the first and must
        // step over it, not slide underneath.
        let out = adjust_positions(&[1.0, 1.2], 0.6).unwrap();
        assert!(out[1] >= 1.6 - EPS, "{out:?}");
        assert_separated(&out, 0.6);
    }

    #[test]
    fn adjustment_is_idempotent_on_its_own_output() {
        let first = adjust_positions(&[0.2, 0.2, 0.2, 1.0, 1.1], 0.6).unwrap();
        let second = adjust_positions(&first, 0.6).unwrap();
        assert_close(&second, &first);
    }

    #[test]
    fn later_labels_never_move_earlier_ones() {
        // Greedy order dependence: prefix results match the full run.
        let input = [0.0, 0.5, 1.0, 1.5];
        let full = adjust_positions(&input, 0.6).unwrap();
        let prefix = adjust_positions(&input[..2], 0.6).unwrap();
        assert_close(&full[..2], &prefix);
    }

    #[test]
    fn zero_and_negative_min_distance_are_rejected() {
        assert_eq!(
            adjust_positions(&[1.0], 0.0),
            Err(LayoutError::InvalidParameter { value: 0.0 })
        );
        assert!(matches!(
            adjust_positions(&[1.0], -0.5),
            Err(LayoutError::InvalidParameter { .. })
        ));
        assert!(matches!(
            adjust_positions(&[1.0], f32::NAN),
            Err(LayoutError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn non_finite_positions_are_rejected_with_index() {
        assert!(matches!(
            adjust_positions(&[0.0, f32::NAN, 1.0], 0.5),
            Err(LayoutError::InvalidInput { index: 1, .. })
        ));
        assert!(matches!(
            adjust_positions(&[f32::INFINITY], 0.5),
            Err(LayoutError::InvalidInput { index: 0, .. })
        ));
    }
}
