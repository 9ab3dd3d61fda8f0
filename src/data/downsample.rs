// ---------------------------------------------------------------------------
// Stride downsampling for the chart
// ---------------------------------------------------------------------------

/// Reduce `data` to roughly `target` points by keeping every `step`-th
/// element, where `step = ceil(len / target)`.
///
/// Order is preserved and the first element is always kept. Values between
/// kept samples are dropped, not aggregated, so the result is for display
/// only and must never feed back into statistics.
pub fn downsample<T: Clone>(data: &[T], target: usize) -> Vec<T> {
    let target = target.max(1);
    if data.len() <= target {
        return data.to_vec();
    }
    let step = data.len().div_ceil(target);
    data.iter().step_by(step).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_is_unchanged() {
        let data = vec![1, 2, 3];
        assert_eq!(downsample(&data, 3), data);
        assert_eq!(downsample(&data, 2000), data);
    }

    #[test]
    fn test_stride_selection() {
        let data: Vec<u32> = (0..10).collect();
        // ceil(10 / 4) = 3
        assert_eq!(downsample(&data, 4), vec![0, 3, 6, 9]);
        // ceil(10 / 3) = 4
        assert_eq!(downsample(&data, 3), vec![0, 4, 8]);
    }

    #[test]
    fn test_never_grows_and_keeps_first() {
        let data: Vec<u32> = (100..3_517).collect();
        for target in [1, 7, 500, 1500, 3_416, 3_417, 5_000] {
            let out = downsample(&data, target);
            assert!(out.len() <= data.len());
            assert!(out.len() <= target);
            assert_eq!(out[0], 100);
        }
    }

    #[test]
    fn test_zero_target_keeps_first_only() {
        assert_eq!(downsample(&[5, 6, 7], 0), vec![5]);
    }

    #[test]
    fn test_empty_input() {
        assert!(downsample::<u8>(&[], 10).is_empty());
    }
}
