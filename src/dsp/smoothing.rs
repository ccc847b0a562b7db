//! DC removal and moving-average smoothing.

/// Integer mean of a raw channel, truncated. Returns 0 for an empty slice.
pub fn channel_mean(samples: &[u32]) -> u32 {
    if samples.is_empty() {
        return 0;
    }
    let sum: u64 = samples.iter().map(|&s| u64::from(s)).sum();
    (sum / samples.len() as u64) as u32
}

/// Subtract `mean` from every raw sample.
///
/// Writes `samples.len()` values into `out` and returns that count.
pub fn remove_dc(
    samples: &[u32],
    mean: u32,
    out: &mut [i32],
) -> usize {
    for (dst, &src) in out.iter_mut().zip(samples) {
        *dst = src as i32 - mean as i32;
    }
    samples.len().min(out.len())
}

/// Difference between the largest and smallest value, 0 for an empty slice.
pub fn peak_to_peak(signal: &[i32]) -> i32 {
    let mut min = i32::MAX;
    let mut max = i32::MIN;
    for &v in signal {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    if signal.is_empty() { 0 } else { max - min }
}

/// Moving average of `width` consecutive samples with truncating division.
///
/// `out[k] = (input[k] + .. + input[k + width - 1]) / width`. Returns the
/// number of outputs, `input.len() - width + 1`, or 0 if the input is shorter
/// than the window.
pub fn moving_average<T: Copy + Into<i64>>(
    input: &[T],
    out: &mut [i32],
    width: usize,
) -> usize {
    if width == 0 || input.len() < width {
        return 0;
    }
    let len = (input.len() - width + 1).min(out.len());
    for (k, dst) in out[..len].iter_mut().enumerate() {
        let sum: i64 = input[k..k + width].iter().map(|&v| Into::<i64>::into(v)).sum();
        *dst = (sum / width as i64) as i32;
    }
    len
}

/// In-place variant of [`moving_average`].
///
/// Output `k` only reads inputs `k..k + width`, none of which have been
/// overwritten yet when processing in ascending order.
pub fn moving_average_in_place(
    signal: &mut [i32],
    width: usize,
) -> usize {
    if width == 0 || signal.len() < width {
        return 0;
    }
    let len = signal.len() - width + 1;
    for k in 0..len {
        let sum: i64 = signal[k..k + width].iter().map(|&v| i64::from(v)).sum();
        signal[k] = (sum / width as i64) as i32;
    }
    len
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_mean_truncates() {
        assert_eq!(channel_mean(&[1, 2, 2]), 1);
        assert_eq!(channel_mean(&[1000, 2000, 3000, 4000]), 2500);
    }

    #[test]
    fn test_channel_mean_empty() {
        assert_eq!(channel_mean(&[]), 0);
    }

    #[test]
    fn test_channel_mean_no_overflow() {
        let samples = [0x3FFFF_u32; 500];
        assert_eq!(channel_mean(&samples), 0x3FFFF);
    }

    #[test]
    fn test_remove_dc() {
        let mut out = [0i32; 4];
        let n = remove_dc(&[90, 100, 110, 120], 105, &mut out);
        assert_eq!(n, 4);
        assert_eq!(out, [-15, -5, 5, 15]);
    }

    #[test]
    fn test_peak_to_peak() {
        assert_eq!(peak_to_peak(&[-15, -5, 5, 15]), 30);
        assert_eq!(peak_to_peak(&[7, 7, 7]), 0);
        assert_eq!(peak_to_peak(&[]), 0);
    }

    #[test]
    fn test_moving_average_width_4() {
        let mut out = [0i32; 8];
        let n = moving_average(&[4i32, 8, 12, 16, 20], &mut out, 4);
        assert_eq!(n, 2);
        assert_eq!(&out[..n], &[10, 14]);
    }

    #[test]
    fn test_moving_average_truncates_toward_zero() {
        let mut out = [0i32; 4];
        let n = moving_average(&[-3i32, -2, 1, 2, 3], &mut out, 2);
        assert_eq!(&out[..n], &[-2, 0, 1, 2]);
    }

    #[test]
    fn test_moving_average_raw_channel() {
        let mut out = [0i32; 4];
        let n = moving_average(&[100u32, 101, 102, 103, 104], &mut out, 4);
        assert_eq!(&out[..n], &[101, 102]);
    }

    #[test]
    fn test_moving_average_short_input() {
        let mut out = [0i32; 4];
        assert_eq!(moving_average(&[1i32, 2, 3], &mut out, 4), 0);
        assert_eq!(moving_average(&[1i32, 2, 3], &mut out, 0), 0);
    }

    #[test]
    fn test_moving_average_in_place_matches_copy() {
        let input = [5i32, -3, 8, 13, -21, 34, 55, -89];
        let mut copy_out = [0i32; 8];
        let expected = moving_average(&input, &mut copy_out, 4);

        let mut signal = input;
        let n = moving_average_in_place(&mut signal, 4);
        assert_eq!(n, expected);
        assert_eq!(&signal[..n], &copy_out[..n]);
    }
}
