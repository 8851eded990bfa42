//! Derivative ladder planning.

/// Ladder widths strictly narrower than the canonical width, ascending.
///
/// Widths at or above the canonical width are skipped; upscaling never
/// happens.
pub fn plan_ladder(canonical_width: u32, ladder: &[u32]) -> Vec<u32> {
    let mut widths: Vec<u32> = ladder
        .iter()
        .copied()
        .filter(|&w| w > 0 && w < canonical_width)
        .collect();
    widths.sort_unstable();
    widths.dedup();
    widths
}

/// Height for `target_width` preserving the aspect ratio of
/// `width` x `height`, rounded and at least 1.
pub fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    if width == 0 {
        return 1;
    }
    let scaled = (u64::from(height) * u64::from(target_width) * 2 + u64::from(width))
        / (2 * u64::from(width));
    scaled.clamp(1, u64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const LADDER: [u32; 3] = [320, 600, 800];

    #[test]
    fn test_wide_image_gets_full_ladder() {
        assert_eq!(plan_ladder(1000, &LADDER), vec![320, 600, 800]);
    }

    #[test]
    fn test_narrow_image_gets_partial_ladder() {
        assert_eq!(plan_ladder(400, &LADDER), vec![320]);
        assert_eq!(plan_ladder(320, &LADDER), Vec::<u32>::new());
        assert_eq!(plan_ladder(100, &LADDER), Vec::<u32>::new());
    }

    #[test]
    fn test_equal_width_is_skipped() {
        assert_eq!(plan_ladder(800, &LADDER), vec![320, 600]);
    }

    #[test]
    fn test_scaled_height_rounds() {
        assert_eq!(scaled_height(1000, 500, 320), 160);
        assert_eq!(scaled_height(1000, 667, 320), 213);
        // 3 * 320 / 1000 = 0.96
        assert_eq!(scaled_height(1000, 3, 320), 1);
        assert_eq!(scaled_height(4000, 1, 320), 1);
    }
}
