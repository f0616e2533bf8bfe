//! Pure calculation functions for responsive dimensions.
//!
//! All functions here are pure and testable without any I/O or images.
//! They implement the two sizing modes of the engine:
//!
//! - **Fit-by-width** (no ratio): scale to a requested width, preserving the
//!   source's natural proportions.
//! - **Ratio fit** (explicit ratio): the largest rectangle with exactly that
//!   ratio that fits inside the source bounds. Never upscales past the source
//!   on either axis.
//!
//! Every result is clamped to at least 1×1 so degenerate inputs can never
//! produce a zero-sized rectangle downstream.

/// A solved width×height rectangle. Both dimensions are always ≥ 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub width: u32,
    pub height: u32,
}

/// Scale a source to a requested width, preserving its natural ratio.
///
/// `height = round(width × source_height / source_width)`.
///
/// The requested width is used as-is even when it exceeds the source width.
/// These are "fit" semantics, not "clamp" semantics: whether an upscaled
/// target makes sense is the caller's call (the thumbnailing capability may
/// itself refuse to upscale).
pub fn fit_width(source: (u32, u32), width: u32) -> Resolved {
    let (src_w, src_h) = source;
    let height = (width as f64 * src_h as f64 / src_w.max(1) as f64).round() as u32;
    Resolved {
        width: width.max(1),
        height: height.max(1),
    }
}

/// Solve the target rectangle for a source, an optional ratio, and an
/// optional requested width.
///
/// - No ratio, requested width: [`fit_width`].
/// - No ratio, no width: the source's own dimensions.
/// - Ratio given: start from `min(requested, source_width)` (or the source
///   width), derive `height = floor(width / ratio)`, and if that height
///   exceeds the source, re-fit by the binding dimension:
///   `height = source_height`, `width = floor(source_height × ratio)`.
///
/// Deterministic: output depends only on the four inputs.
pub fn solve(source: (u32, u32), ratio: Option<f64>, requested_width: Option<u32>) -> Resolved {
    let (src_w, src_h) = source;
    let Some(ratio) = ratio.filter(|r| r.is_finite() && *r > 0.0) else {
        return match requested_width {
            Some(width) => fit_width(source, width),
            None => Resolved {
                width: src_w.max(1),
                height: src_h.max(1),
            },
        };
    };

    let mut width = requested_width.map_or(src_w, |w| w.min(src_w));
    let mut height = (width as f64 / ratio).floor() as u32;
    if height > src_h {
        height = src_h;
        width = (src_h as f64 * ratio).floor() as u32;
    }

    Resolved {
        width: width.max(1),
        height: height.max(1),
    }
}

/// The source's natural width/height ratio, guarded against a zero height.
pub fn natural_ratio(source: (u32, u32)) -> f64 {
    let (src_w, src_h) = source;
    src_w as f64 / src_h.max(1) as f64
}

/// Compute the small sampling box for placeholder generation.
///
/// The longer edge gets `max_size` pixels and the shorter edge follows the
/// ratio: taller-than-wide sources pin the height, everything else pins the
/// width. Results are rounded and clamped to ≥ 1 regardless of how
/// degenerate the inputs are.
pub fn sample_box(source: (u32, u32), ratio: f64, max_size: u32) -> Resolved {
    let ratio = if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    };
    let (src_w, src_h) = source;
    let max_size = max_size.max(1);

    let (width, height) = if src_h > src_w {
        let height = max_size;
        let width = (height as f64 * ratio).round() as u32;
        (width, height)
    } else {
        let width = max_size;
        let height = (width as f64 / ratio).round() as u32;
        (width, height)
    };

    Resolved {
        width: width.max(1),
        height: height.max(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // fit_width (no ratio)
    // =========================================================================

    #[test]
    fn fit_width_preserves_natural_ratio() {
        // 1200x800 at width 300 → 300x200
        assert_eq!(
            fit_width((1200, 800), 300),
            Resolved {
                width: 300,
                height: 200
            }
        );
    }

    #[test]
    fn fit_width_rounds_height() {
        // 1000x750 at width 333 → height = round(333 * 0.75) = round(249.75) = 250
        assert_eq!(fit_width((1000, 750), 333).height, 250);
    }

    #[test]
    fn fit_width_allows_upscaled_targets() {
        // Fit semantics: a width past the source is honored, not clamped.
        assert_eq!(
            fit_width((800, 600), 1600),
            Resolved {
                width: 1600,
                height: 1200
            }
        );
    }

    #[test]
    fn fit_width_never_returns_zero() {
        assert_eq!(
            fit_width((800, 1), 1),
            Resolved {
                width: 1,
                height: 1
            }
        );
    }

    // =========================================================================
    // solve — whole-image cases
    // =========================================================================

    #[test]
    fn no_ratio_no_width_is_source_size() {
        assert_eq!(
            solve((1200, 800), None, None),
            Resolved {
                width: 1200,
                height: 800
            }
        );
    }

    #[test]
    fn landscape_ratio_matching_source_is_identity() {
        // 1600x900 with ratio 16/9 → unchanged
        assert_eq!(
            solve((1600, 900), Some(16.0 / 9.0), None),
            Resolved {
                width: 1600,
                height: 900
            }
        );
    }

    #[test]
    fn square_ratio_bound_by_source_height() {
        // 800x600 with ratio 1.0: height would be 800, capped at 600,
        // width re-fit to 600
        assert_eq!(
            solve((800, 600), Some(1.0), None),
            Resolved {
                width: 600,
                height: 600
            }
        );
    }

    #[test]
    fn portrait_ratio_refits_by_height() {
        // 900x600 with ratio 9/16: height would be 1600, capped at 600,
        // width = floor(600 * 9/16) = 337
        assert_eq!(
            solve((900, 600), Some(9.0 / 16.0), None),
            Resolved {
                width: 337,
                height: 600
            }
        );
    }

    #[test]
    fn fractional_ratio_refits() {
        // 1000x750 with ratio 2/3: height would be 1500, capped at 750,
        // width = floor(750 * 2/3) = 500
        assert_eq!(
            solve((1000, 750), Some(2.0 / 3.0), None),
            Resolved {
                width: 500,
                height: 750
            }
        );
    }

    // =========================================================================
    // solve — per-breakpoint cases
    // =========================================================================

    #[test]
    fn ratio_breakpoints_derive_floored_heights() {
        // 1600x900, ratio 16/9, breakpoints 400/800/1200 → heights 225/450/675
        for (width, height) in [(400, 225), (800, 450), (1200, 675)] {
            assert_eq!(
                solve((1600, 900), Some(16.0 / 9.0), Some(width)),
                Resolved { width, height }
            );
        }
    }

    #[test]
    fn ratio_breakpoint_capped_by_source_bounds() {
        // 1024x767, ratio 9/16, breakpoint 2000: width caps at 1024, height
        // would be 1820 → re-fit: height 767, width floor(767 * 9/16) = 431
        assert_eq!(
            solve((1024, 767), Some(9.0 / 16.0), Some(2000)),
            Resolved {
                width: 431,
                height: 767
            }
        );
    }

    #[test]
    fn ratio_breakpoint_within_bounds_unchanged() {
        // 1024x767, ratio 9/16, breakpoint 400 → 400x711
        assert_eq!(
            solve((1024, 767), Some(9.0 / 16.0), Some(400)),
            Resolved {
                width: 400,
                height: 711
            }
        );
    }

    #[test]
    fn solved_rectangle_never_exceeds_source() {
        let ratios = [0.25, 0.5625, 1.0, 1.5, 16.0 / 9.0, 4.0];
        let sources = [(1024, 767), (900, 1600), (50, 50), (3000, 200)];
        for &source in &sources {
            for &ratio in &ratios {
                for requested in [None, Some(10), Some(400), Some(5000)] {
                    let r = solve(source, Some(ratio), requested);
                    assert!(r.width <= source.0, "{source:?} {ratio} {requested:?}");
                    assert!(r.height <= source.1, "{source:?} {ratio} {requested:?}");
                }
            }
        }
    }

    #[test]
    fn invalid_ratio_falls_back_to_natural() {
        assert_eq!(solve((800, 600), Some(0.0), None), solve((800, 600), None, None));
        assert_eq!(
            solve((800, 600), Some(f64::NAN), Some(400)),
            solve((800, 600), None, Some(400))
        );
    }

    #[test]
    fn solve_clamps_to_one_pixel() {
        // Extreme ratio against a tiny source still yields a drawable box
        let r = solve((1, 2000), Some(100.0), None);
        assert!(r.width >= 1 && r.height >= 1);
    }

    // =========================================================================
    // sample_box
    // =========================================================================

    #[test]
    fn sample_box_landscape_pins_width() {
        // 1600x900 with its natural ratio → 100 x round(100 / 1.777) = 56
        let ratio = natural_ratio((1600, 900));
        assert_eq!(
            sample_box((1600, 900), ratio, 100),
            Resolved {
                width: 100,
                height: 56
            }
        );
    }

    #[test]
    fn sample_box_portrait_pins_height() {
        // 900x1600 taller than wide → height 100, width = round(100 * 0.5625) = 56
        let ratio = natural_ratio((900, 1600));
        assert_eq!(
            sample_box((900, 1600), ratio, 100),
            Resolved {
                width: 56,
                height: 100
            }
        );
    }

    #[test]
    fn sample_box_square_source() {
        assert_eq!(
            sample_box((500, 500), 1.0, 100),
            Resolved {
                width: 100,
                height: 100
            }
        );
    }

    #[test]
    fn sample_box_guards_degenerate_inputs() {
        // Zero-ish sources and broken ratios still produce ≥ 1x1
        let r = sample_box((0, 0), 0.0, 100);
        assert!(r.width >= 1 && r.height >= 1);

        let r = sample_box((800, 0), f64::INFINITY, 0);
        assert!(r.width >= 1 && r.height >= 1);
    }

    #[test]
    fn natural_ratio_guards_zero_height() {
        assert_eq!(natural_ratio((800, 0)), 800.0);
        assert_eq!(natural_ratio((1600, 900)), 1600.0 / 900.0);
    }
}
