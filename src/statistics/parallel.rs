//! Parallel lane reductions
//!
//! An axis reduction treats the tensor as the set of 1-D lanes along that axis.
//! The output is allocated up front with the reduced shape and every lane writes
//! only its own slot, so the result is in row-major order over the remaining
//! axes no matter how Rayon schedules the work.

use ndarray::{ArrayD, ArrayView1, ArrayViewD, Axis, IxDyn, Zip};
use tracing::debug;

/// Axis reductions with fewer lanes than this stay on the calling thread.
pub const PARALLEL_MIN_LANES: usize = 64;

fn output_for(data: &ArrayViewD<'_, f64>, axis: usize) -> ArrayD<f64> {
    let mut shape = data.shape().to_vec();
    shape.remove(axis);
    ArrayD::zeros(IxDyn(&shape))
}

/// Reduce every lane along `axis` with `kernel`.
///
/// `axis` must already be validated against the rank of `data`.
pub fn reduce_lanes<F>(data: &ArrayViewD<'_, f64>, axis: usize, kernel: F) -> ArrayD<f64>
where
    F: Fn(ArrayView1<'_, f64>) -> f64 + Sync + Send,
{
    let mut output = output_for(data, axis);
    let lanes = output.len();
    let parallel = lanes >= PARALLEL_MIN_LANES;

    debug!(
        axis,
        lanes,
        lane_len = data.len_of(Axis(axis)),
        parallel,
        threads = rayon::current_num_threads(),
        "reducing lanes"
    );

    let zip = Zip::from(&mut output).and(data.lanes(Axis(axis)));
    if parallel {
        zip.par_for_each(|slot, lane| *slot = kernel(lane));
    } else {
        zip.for_each(|slot, lane| *slot = kernel(lane));
    }

    output
}

/// Reduce every lane along `axis` with `kernel`, pairing each lane with the
/// matching element of `aux` (which must have the reduced shape).
pub fn reduce_lanes_with<F>(
    data: &ArrayViewD<'_, f64>,
    axis: usize,
    aux: &ArrayViewD<'_, f64>,
    kernel: F,
) -> ArrayD<f64>
where
    F: Fn(ArrayView1<'_, f64>, f64) -> f64 + Sync + Send,
{
    let mut output = output_for(data, axis);
    let lanes = output.len();
    let parallel = lanes >= PARALLEL_MIN_LANES;

    debug!(
        axis,
        lanes,
        lane_len = data.len_of(Axis(axis)),
        parallel,
        "reducing lanes against auxiliary values"
    );

    let zip = Zip::from(&mut output)
        .and(data.lanes(Axis(axis)))
        .and(aux);
    if parallel {
        zip.par_for_each(|slot, lane, &extra| *slot = kernel(lane, extra));
    } else {
        zip.for_each(|slot, lane, &extra| *slot = kernel(lane, extra));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;

    #[test]
    fn parallel_and_sequential_paths_agree() {
        // 2 lanes of 500 stays sequential, 500 lanes of 2 goes parallel
        let data = Array::from_iter((0..1000).map(f64::from)).into_shape(vec![2, 500]).unwrap();
        let view = data.view();

        let wide = reduce_lanes(&view, 1, |lane| lane.sum());
        let narrow = reduce_lanes(&view, 0, |lane| lane.sum());

        assert_eq!(wide.shape(), &[2]);
        assert_eq!(narrow.shape(), &[500]);

        let expected_wide: Vec<f64> = (0..2)
            .map(|r| (0..500).map(|c| f64::from(r * 500 + c)).sum())
            .collect();
        let expected_narrow: Vec<f64> = (0..500).map(|c| f64::from(c + c + 500)).collect();
        assert_eq!(wide.iter().copied().collect::<Vec<_>>(), expected_wide);
        assert_eq!(narrow.iter().copied().collect::<Vec<_>>(), expected_narrow);
    }

    #[test]
    fn auxiliary_values_follow_lane_order() {
        let data = Array::from_iter((0..6).map(f64::from)).into_shape(vec![2, 3]).unwrap();
        let offsets = Array::from_vec(vec![10.0, 20.0]).into_dyn();
        let out = reduce_lanes_with(&data.view(), 1, &offsets.view(), |lane, offset| {
            lane[0] + offset
        });
        assert_eq!(out.iter().copied().collect::<Vec<_>>(), vec![10.0, 23.0]);
    }
}
